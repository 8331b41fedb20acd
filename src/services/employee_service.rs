//! Employee service: store and cache orchestration.
//!
//! Every read goes through the cache first; every mutation writes through to
//! the store and then evicts. The eviction scope differs per operation:
//!
//! | operation | per-id entry          | collection entry |
//! |-----------|-----------------------|------------------|
//! | create    | all evicted           | evicted          |
//! | update    | evicted for that id   | **kept**         |
//! | patch     | evicted for that id   | **kept**         |
//! | delete    | all evicted           | evicted          |
//!
//! Keeping the collection entry on update means a listing cached before the
//! update keeps being served until the next create or delete. Per-id reads
//! are never stale after a write through this service.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Employee, EmployeeDetails, EmployeePatch};
use crate::domain::ports::{CacheKey, CachedEntry, EmployeeCache, EmployeeRepository};

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

pub struct EmployeeService<R: EmployeeRepository, C: EmployeeCache> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R: EmployeeRepository, C: EmployeeCache> EmployeeService<R, C> {
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self { repository, cache }
    }

    /// Get an employee by id, serving from the cache when possible.
    pub async fn get_employee(&self, id: i64) -> DomainResult<Employee> {
        let start = Instant::now();
        let key = CacheKey::Employee(id);

        if let Some(CachedEntry::Employee(employee)) = self.cache.lookup(&key).await {
            debug!(employee_id = id, "employee cache hit");
            return Ok((*employee).clone());
        }

        info!(employee_id = id, "fetching employee");
        let employee = self
            .repository
            .get(id)
            .await?
            .ok_or(DomainError::EmployeeNotFound(id))?;

        self.cache
            .store(key, CachedEntry::Employee(Arc::new(employee.clone())))
            .await;

        info!(employee_id = id, elapsed_ms = elapsed_ms(start), "fetched employee");
        Ok(employee)
    }

    /// List all employees, serving the cached listing when present.
    pub async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        let start = Instant::now();

        if let Some(CachedEntry::Employees(employees)) = self.cache.lookup(&CacheKey::AllEmployees).await {
            debug!(count = employees.len(), "employee listing cache hit");
            return Ok((*employees).clone());
        }

        info!("fetching all employees");
        let employees = self.repository.list().await?;

        self.cache
            .store(CacheKey::AllEmployees, CachedEntry::Employees(Arc::new(employees.clone())))
            .await;

        info!(count = employees.len(), elapsed_ms = elapsed_ms(start), "fetched all employees");
        Ok(employees)
    }

    /// Create an employee, then drop every cached entry.
    pub async fn create_employee(&self, details: EmployeeDetails) -> DomainResult<Employee> {
        details.validate().map_err(DomainError::InvalidArgument)?;
        info!(email = %details.email, "creating employee");

        let employee = self.repository.create(&details).await?;
        self.cache.evict_all().await;

        info!(employee_id = employee.id, "created employee");
        Ok(employee)
    }

    /// Replace every editable field of an employee.
    ///
    /// Only the per-id cache entry is evicted; a cached listing survives.
    pub async fn update_employee(&self, id: i64, details: Option<EmployeeDetails>) -> DomainResult<Employee> {
        info!(employee_id = id, "updating employee");

        let Some(details) = details else {
            error!(employee_id = id, "update received no employee details");
            return Err(DomainError::InvalidArgument(
                "Employee details cannot be null".to_string(),
            ));
        };
        details.validate().map_err(DomainError::InvalidArgument)?;

        self.get_employee(id).await?;
        self.save_and_evict(id, &details).await
    }

    /// Merge the present fields of `patch` into an employee.
    ///
    /// Same cache scope as [`update_employee`](Self::update_employee).
    pub async fn patch_employee(&self, id: i64, patch: Option<EmployeePatch>) -> DomainResult<Employee> {
        info!(employee_id = id, "patching employee");

        let Some(patch) = patch else {
            error!(employee_id = id, "patch received no employee fields");
            return Err(DomainError::InvalidArgument(
                "Employee patch cannot be null".to_string(),
            ));
        };

        let current = self.get_employee(id).await?;
        let details = patch.apply_to(current.to_details());
        details.validate().map_err(DomainError::InvalidArgument)?;

        self.save_and_evict(id, &details).await
    }

    async fn save_and_evict(&self, id: i64, details: &EmployeeDetails) -> DomainResult<Employee> {
        let result = self.repository.update(id, details).await;
        // The lookup above may have cached the pre-update record.
        self.cache.evict(&CacheKey::Employee(id)).await;

        let employee = result?;
        info!(employee_id = id, "saved updated employee");
        Ok(employee)
    }

    /// Delete an employee, then drop every cached entry.
    pub async fn delete_employee(&self, id: i64) -> DomainResult<()> {
        info!(employee_id = id, "deleting employee");

        self.get_employee(id).await?;
        self.repository.delete(id).await?;
        self.cache.evict_all().await;

        info!(employee_id = id, "employee deleted successfully");
        Ok(())
    }

    /// Look up an employee by email. Not cached.
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        self.repository.find_by_email(email).await
    }

    /// Employees in a department. Not cached.
    pub async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Employee>> {
        self.repository.find_by_department(department).await
    }

    /// Employees of an employer. Not cached.
    pub async fn find_by_employer(&self, employer_id: i64) -> DomainResult<Vec<Employee>> {
        self.repository.find_by_employer(employer_id).await
    }
}

//! Employee repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Employee, EmployeeDetails};

/// Repository interface for Employee persistence.
///
/// The store owns identity and timestamps: `create` assigns the id and stamps
/// `created_at == updated_at`, `update` refreshes `updated_at` only.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee and return it as stored.
    async fn create(&self, details: &EmployeeDetails) -> DomainResult<Employee>;

    /// Get an employee by ID.
    async fn get(&self, id: i64) -> DomainResult<Option<Employee>>;

    /// Replace the editable fields of an existing employee.
    async fn update(&self, id: i64, details: &EmployeeDetails) -> DomainResult<Employee>;

    /// Delete an employee by ID.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List every employee, ordered by id.
    async fn list(&self) -> DomainResult<Vec<Employee>>;

    /// Find the employee holding an email address.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>>;

    /// All employees in a department.
    async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Employee>>;

    /// All employees of an employer.
    async fn find_by_employer(&self, employer_id: i64) -> DomainResult<Vec<Employee>>;
}

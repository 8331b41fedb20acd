//! SQLite implementation of the EmployeeRepository.
//!
//! Skills and projects live in `employee_skills` / `employee_projects` join
//! tables. They are rewritten in the same transaction as the employee row and
//! resolved to `{id, name}` summaries on every read.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::{BTreeSet, HashMap};

use super::{is_foreign_key_violation, is_unique_violation, parse_datetime};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Employee, EmployeeDetails, Employer, EntityRef, ProjectStatus, ProjectSummary, Skill,
};
use crate::domain::ports::EmployeeRepository;

const SELECT_EMPLOYEES: &str = "SELECT e.id, e.first_name, e.last_name, e.email, e.department, e.position, \
     e.employer_id, er.name AS employer_name, e.created_at, e.updated_at \
     FROM employees e LEFT JOIN employers er ON er.id = e.employer_id";

#[derive(Clone)]
pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach skills and projects to a batch of employee rows.
    async fn hydrate(&self, rows: Vec<EmployeeRow>) -> DomainResult<Vec<Employee>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let placeholders = vec!["?"; ids.len()].join(", ");

        let skills_sql = format!(
            "SELECT es.employee_id, s.id, s.name FROM employee_skills es \
             JOIN skills s ON s.id = es.skill_id \
             WHERE es.employee_id IN ({placeholders}) ORDER BY s.id"
        );
        let mut skills_query = sqlx::query_as::<_, (i64, i64, String)>(&skills_sql);
        for id in &ids {
            skills_query = skills_query.bind(*id);
        }
        let mut skills: HashMap<i64, Vec<Skill>> = HashMap::new();
        for (employee_id, id, name) in skills_query.fetch_all(&self.pool).await? {
            skills.entry(employee_id).or_default().push(Skill { id, name });
        }

        let projects_sql = format!(
            "SELECT ep.employee_id, p.id, p.name, p.status FROM employee_projects ep \
             JOIN projects p ON p.id = ep.project_id \
             WHERE ep.employee_id IN ({placeholders}) ORDER BY p.id"
        );
        let mut projects_query = sqlx::query_as::<_, (i64, i64, String, String)>(&projects_sql);
        for id in &ids {
            projects_query = projects_query.bind(*id);
        }
        let mut projects: HashMap<i64, Vec<ProjectSummary>> = HashMap::new();
        for (employee_id, id, name, status) in projects_query.fetch_all(&self.pool).await? {
            let status = ProjectStatus::from_str(&status)
                .ok_or_else(|| DomainError::SerializationError(format!("Invalid project status: {status}")))?;
            projects.entry(employee_id).or_default().push(ProjectSummary { id, name, status });
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_employee(
                    skills.remove(&id).unwrap_or_default(),
                    projects.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    async fn fetch_where(&self, clause: &str, bind: BindValue<'_>) -> DomainResult<Vec<Employee>> {
        let sql = format!("{SELECT_EMPLOYEES} WHERE {clause} ORDER BY e.id");
        let query = sqlx::query_as::<_, EmployeeRow>(&sql);
        let query = match bind {
            BindValue::Int(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
        };
        let rows = query.fetch_all(&self.pool).await?;
        self.hydrate(rows).await
    }
}

enum BindValue<'a> {
    Int(i64),
    Text(&'a str),
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn create(&self, details: &EmployeeDetails) -> DomainResult<Employee> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        ensure_references_exist(&mut tx, details).await?;

        let result = sqlx::query(
            r#"INSERT INTO employees (first_name, last_name, email, department, position, employer_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.department)
        .bind(&details.position)
        .bind(details.employer.map(|e| e.id))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, details))?;

        let id = result.last_insert_rowid();
        write_associations(&mut tx, id, details).await?;
        tx.commit().await?;

        self.get(id).await?.ok_or(DomainError::EmployeeNotFound(id))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Employee>> {
        Ok(self.fetch_where("e.id = ?", BindValue::Int(id)).await?.into_iter().next())
    }

    async fn update(&self, id: i64, details: &EmployeeDetails) -> DomainResult<Employee> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DomainError::EmployeeNotFound(id));
        }

        ensure_references_exist(&mut tx, details).await?;

        sqlx::query(
            r#"UPDATE employees SET first_name = ?, last_name = ?, email = ?, department = ?,
               position = ?, employer_id = ?, updated_at = ?
               WHERE id = ?"#
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.department)
        .bind(&details.position)
        .bind(details.employer.map(|e| e.id))
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, details))?;

        sqlx::query("DELETE FROM employee_skills WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM employee_projects WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        write_associations(&mut tx, id, details).await?;
        tx.commit().await?;

        self.get(id).await?.ok_or(DomainError::EmployeeNotFound(id))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EmployeeNotFound(id));
        }

        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Employee>> {
        let sql = format!("{SELECT_EMPLOYEES} ORDER BY e.id");
        let rows: Vec<EmployeeRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.hydrate(rows).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        Ok(self.fetch_where("e.email = ?", BindValue::Text(email)).await?.into_iter().next())
    }

    async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Employee>> {
        self.fetch_where("e.department = ?", BindValue::Text(department)).await
    }

    async fn find_by_employer(&self, employer_id: i64) -> DomainResult<Vec<Employee>> {
        self.fetch_where("e.employer_id = ?", BindValue::Int(employer_id)).await
    }
}

fn map_write_error(err: sqlx::Error, details: &EmployeeDetails) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::Conflict(format!("email '{}' is already in use", details.email));
    }
    if is_foreign_key_violation(&err) {
        return DomainError::InvalidArgument("employee references a missing catalog entry".to_string());
    }
    DomainError::from(err)
}

fn unique_ids(refs: &[EntityRef]) -> BTreeSet<i64> {
    refs.iter().map(|r| r.id).collect()
}

async fn reference_exists(conn: &mut SqliteConnection, table: &str, id: i64) -> DomainResult<bool> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?");
    let found: Option<(i64,)> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut *conn).await?;
    Ok(found.is_some())
}

/// Reject references to employers, skills or projects that do not exist.
async fn ensure_references_exist(conn: &mut SqliteConnection, details: &EmployeeDetails) -> DomainResult<()> {
    if let Some(employer) = details.employer {
        if !reference_exists(conn, "employers", employer.id).await? {
            return Err(DomainError::InvalidArgument(format!("employer {} does not exist", employer.id)));
        }
    }
    for id in unique_ids(&details.skills) {
        if !reference_exists(conn, "skills", id).await? {
            return Err(DomainError::InvalidArgument(format!("skill {id} does not exist")));
        }
    }
    for id in unique_ids(&details.projects) {
        if !reference_exists(conn, "projects", id).await? {
            return Err(DomainError::InvalidArgument(format!("project {id} does not exist")));
        }
    }
    Ok(())
}

async fn write_associations(conn: &mut SqliteConnection, employee_id: i64, details: &EmployeeDetails) -> DomainResult<()> {
    for skill_id in unique_ids(&details.skills) {
        sqlx::query("INSERT INTO employee_skills (employee_id, skill_id) VALUES (?, ?)")
            .bind(employee_id)
            .bind(skill_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_write_error(e, details))?;
    }
    for project_id in unique_ids(&details.projects) {
        sqlx::query("INSERT INTO employee_projects (employee_id, project_id) VALUES (?, ?)")
            .bind(employee_id)
            .bind(project_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_write_error(e, details))?;
    }
    Ok(())
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    position: String,
    employer_id: Option<i64>,
    employer_name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl EmployeeRow {
    fn into_employee(self, skills: Vec<Skill>, projects: Vec<ProjectSummary>) -> DomainResult<Employee> {
        let employer = match (self.employer_id, self.employer_name) {
            (Some(id), Some(name)) => Some(Employer { id, name }),
            _ => None,
        };

        Ok(Employee {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            position: self.position,
            employer,
            skills,
            projects,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteCatalogRepository};
    use crate::domain::models::{NewCatalogEntry, NewProject};
    use crate::domain::ports::CatalogRepository;

    async fn setup() -> (SqliteEmployeeRepository, SqliteCatalogRepository) {
        let pool = create_migrated_test_pool().await.unwrap();
        (SqliteEmployeeRepository::new(pool.clone()), SqliteCatalogRepository::new(pool))
    }

    fn ada() -> EmployeeDetails {
        EmployeeDetails::new("Ada", "Lovelace", "ada@example.com", "Engineering", "Analyst")
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (repo, _) = setup().await;

        let employee = repo.create(&ada()).await.unwrap();
        assert_eq!(employee.id, 1);
        assert_eq!(employee.created_at, employee.updated_at);
        assert_eq!(employee.email, "ada@example.com");

        let second = repo
            .create(&EmployeeDetails::new("Alan", "Turing", "alan@example.com", "Research", "Fellow"))
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (repo, _) = setup().await;
        repo.create(&ada()).await.unwrap();

        let err = repo.create(&ada()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let (repo, _) = setup().await;
        let created = repo.create(&ada()).await.unwrap();

        let mut details = created.to_details();
        details.position = "Lead Analyst".to_string();
        let updated = repo.update(created.id, &details).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.position, "Lead Analyst");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_employee() {
        let (repo, _) = setup().await;
        let err = repo.update(99, &ada()).await.unwrap_err();
        assert!(matches!(err, DomainError::EmployeeNotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let (repo, _) = setup().await;
        let employee = repo.create(&ada()).await.unwrap();

        repo.delete(employee.id).await.unwrap();
        assert!(repo.get(employee.id).await.unwrap().is_none());

        let err = repo.delete(employee.id).await.unwrap_err();
        assert!(matches!(err, DomainError::EmployeeNotFound(_)));
    }

    #[tokio::test]
    async fn test_associations_resolved_and_replaced() {
        let (repo, catalog) = setup().await;
        let employer = catalog.create_employer(&NewCatalogEntry::new("Analytical Engines")).await.unwrap();
        let rust = catalog.create_skill(&NewCatalogEntry::new("Rust")).await.unwrap();
        let sql = catalog.create_skill(&NewCatalogEntry::new("SQL")).await.unwrap();
        let project = catalog.create_project(&NewProject::new("Difference Engine", Utc::now())).await.unwrap();

        let details = ada()
            .with_employer(employer.id)
            .with_skill(sql.id)
            .with_skill(rust.id)
            .with_skill(rust.id)
            .with_project(project.id);
        let employee = repo.create(&details).await.unwrap();

        assert_eq!(employee.employer, Some(employer.clone()));
        assert_eq!(employee.skills, vec![rust.clone(), sql.clone()]);
        assert_eq!(employee.projects, vec![project.summary()]);

        let mut replacement = employee.to_details();
        replacement.skills = vec![EntityRef::new(sql.id)];
        replacement.projects.clear();
        let updated = repo.update(employee.id, &replacement).await.unwrap();
        assert_eq!(updated.skills, vec![sql]);
        assert!(updated.projects.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_reference_rejected() {
        let (repo, _) = setup().await;
        let err = repo.create(&ada().with_skill(42)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_secondary_lookups() {
        let (repo, catalog) = setup().await;
        let employer = catalog.create_employer(&NewCatalogEntry::new("Acme")).await.unwrap();

        repo.create(&ada().with_employer(employer.id)).await.unwrap();
        repo.create(&EmployeeDetails::new("Alan", "Turing", "alan@example.com", "Research", "Fellow"))
            .await
            .unwrap();
        repo.create(&EmployeeDetails::new("Grace", "Hopper", "grace@example.com", "Engineering", "Admiral"))
            .await
            .unwrap();

        let found = repo.find_by_email("alan@example.com").await.unwrap().unwrap();
        assert_eq!(found.last_name, "Turing");
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());

        let engineering = repo.find_by_department("Engineering").await.unwrap();
        assert_eq!(engineering.len(), 2);

        let acme = repo.find_by_employer(employer.id).await.unwrap();
        assert_eq!(acme.len(), 1);
        assert_eq!(acme[0].first_name, "Ada");
    }
}

//! SQLite implementation of the CatalogRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{is_unique_violation, parse_datetime, parse_optional_datetime};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Employer, NewCatalogEntry, NewProject, Project, ProjectStatus, Skill};
use crate::domain::ports::CatalogRepository;

const SELECT_PROJECTS: &str =
    "SELECT id, name, description, start_date, end_date, status, created_at, updated_at FROM projects";

#[derive(Clone)]
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert into one of the `(id, name UNIQUE)` tables.
    async fn insert_named(&self, table: &str, kind: &str, entry: &NewCatalogEntry) -> DomainResult<i64> {
        let sql = format!("INSERT INTO {table} (name) VALUES (?)");
        let result = sqlx::query(&sql)
            .bind(&entry.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict(format!("{kind} '{}' already exists", entry.name))
                } else {
                    DomainError::from(e)
                }
            })?;
        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn create_employer(&self, entry: &NewCatalogEntry) -> DomainResult<Employer> {
        let id = self.insert_named("employers", "employer", entry).await?;
        Ok(Employer { id, name: entry.name.clone() })
    }

    async fn get_employer(&self, id: i64) -> DomainResult<Option<Employer>> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM employers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, name)| Employer { id, name }))
    }

    async fn list_employers(&self) -> DomainResult<Vec<Employer>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM employers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| Employer { id, name }).collect())
    }

    async fn create_skill(&self, entry: &NewCatalogEntry) -> DomainResult<Skill> {
        let id = self.insert_named("skills", "skill", entry).await?;
        Ok(Skill { id, name: entry.name.clone() })
    }

    async fn get_skill(&self, id: i64) -> DomainResult<Option<Skill>> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM skills WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, name)| Skill { id, name }))
    }

    async fn list_skills(&self) -> DomainResult<Vec<Skill>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM skills ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| Skill { id, name }).collect())
    }

    async fn create_project(&self, project: &NewProject) -> DomainResult<Project> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO projects (name, description, start_date, end_date, status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date.to_rfc3339())
        .bind(project.end_date.map(|d| d.to_rfc3339()))
        .bind(project.status.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_project(id).await?.ok_or(DomainError::ProjectNotFound(id))
    }

    async fn get_project(&self, id: i64) -> DomainResult<Option<Project>> {
        let sql = format!("{SELECT_PROJECTS} WHERE id = ?");
        let row: Option<ProjectRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_projects(&self) -> DomainResult<Vec<Project>> {
        let sql = format!("{SELECT_PROJECTS} ORDER BY id");
        let rows: Vec<ProjectRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    start_date: String,
    end_date: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = DomainError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_str(&row.status)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid status: {}", row.status)))?;

        Ok(Project {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: parse_datetime(&row.start_date)?,
            end_date: parse_optional_datetime(row.end_date)?,
            status,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use chrono::Duration;

    async fn setup_test_repo() -> SqliteCatalogRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteCatalogRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_list_employers() {
        let repo = setup_test_repo().await;
        let acme = repo.create_employer(&NewCatalogEntry::new("Acme")).await.unwrap();
        repo.create_employer(&NewCatalogEntry::new("Globex")).await.unwrap();

        assert_eq!(repo.get_employer(acme.id).await.unwrap(), Some(acme));
        assert_eq!(repo.list_employers().await.unwrap().len(), 2);
        assert!(repo.get_employer(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_skill_is_conflict() {
        let repo = setup_test_repo().await;
        repo.create_skill(&NewCatalogEntry::new("Rust")).await.unwrap();

        let err = repo.create_skill(&NewCatalogEntry::new("Rust")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_project_round_trip() {
        let repo = setup_test_repo().await;
        let start = Utc::now();
        let new = NewProject::new("Apollo", start)
            .with_status(ProjectStatus::InProgress)
            .with_end_date(start + Duration::days(90));

        let project = repo.create_project(&new).await.unwrap();
        assert_eq!(project.name, "Apollo");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.start_date, start);
        assert_eq!(project.end_date, Some(start + Duration::days(90)));
        assert_eq!(project.created_at, project.updated_at);

        let listed = repo.list_projects().await.unwrap();
        assert_eq!(listed, vec![project]);
    }
}

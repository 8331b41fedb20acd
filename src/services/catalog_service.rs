//! Catalog service: employers, skills and projects.
//!
//! Catalog entries are never cached; they are small and only change through
//! the create calls below.

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Employer, NewCatalogEntry, NewProject, Project, Skill};
use crate::domain::ports::CatalogRepository;

pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_employer(&self, entry: NewCatalogEntry) -> DomainResult<Employer> {
        entry.validate().map_err(DomainError::InvalidArgument)?;
        let employer = self.repository.create_employer(&entry).await?;
        info!(employer_id = employer.id, name = %employer.name, "created employer");
        Ok(employer)
    }

    pub async fn get_employer(&self, id: i64) -> DomainResult<Employer> {
        self.repository
            .get_employer(id)
            .await?
            .ok_or(DomainError::EmployerNotFound(id))
    }

    pub async fn list_employers(&self) -> DomainResult<Vec<Employer>> {
        self.repository.list_employers().await
    }

    pub async fn create_skill(&self, entry: NewCatalogEntry) -> DomainResult<Skill> {
        entry.validate().map_err(DomainError::InvalidArgument)?;
        let skill = self.repository.create_skill(&entry).await?;
        info!(skill_id = skill.id, name = %skill.name, "created skill");
        Ok(skill)
    }

    pub async fn get_skill(&self, id: i64) -> DomainResult<Skill> {
        self.repository
            .get_skill(id)
            .await?
            .ok_or(DomainError::SkillNotFound(id))
    }

    pub async fn list_skills(&self) -> DomainResult<Vec<Skill>> {
        self.repository.list_skills().await
    }

    pub async fn create_project(&self, project: NewProject) -> DomainResult<Project> {
        project.validate().map_err(DomainError::InvalidArgument)?;
        let project = self.repository.create_project(&project).await?;
        info!(project_id = project.id, name = %project.name, status = project.status.as_str(), "created project");
        Ok(project)
    }

    pub async fn get_project(&self, id: i64) -> DomainResult<Project> {
        self.repository
            .get_project(id)
            .await?
            .ok_or(DomainError::ProjectNotFound(id))
    }

    pub async fn list_projects(&self) -> DomainResult<Vec<Project>> {
        self.repository.list_projects().await
    }
}

//! Catalog repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Employer, NewCatalogEntry, NewProject, Project, Skill};

/// Repository interface for the employers, skills and projects employees reference.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_employer(&self, entry: &NewCatalogEntry) -> DomainResult<Employer>;

    async fn get_employer(&self, id: i64) -> DomainResult<Option<Employer>>;

    async fn list_employers(&self) -> DomainResult<Vec<Employer>>;

    async fn create_skill(&self, entry: &NewCatalogEntry) -> DomainResult<Skill>;

    async fn get_skill(&self, id: i64) -> DomainResult<Option<Skill>>;

    async fn list_skills(&self) -> DomainResult<Vec<Skill>>;

    async fn create_project(&self, project: &NewProject) -> DomainResult<Project>;

    async fn get_project(&self, id: i64) -> DomainResult<Option<Project>>;

    async fn list_projects(&self) -> DomainResult<Vec<Project>>;
}

//! Employer, skill and project routes.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

use super::error::{domain_error, path_id, require_json_body, ApiError};
use crate::domain::models::{Employer, NewCatalogEntry, NewProject, Project, Skill};
use crate::domain::ports::CatalogRepository;
use crate::services::CatalogService;

type Service<K> = Arc<CatalogService<K>>;

pub fn routes<K: CatalogRepository + 'static>(service: Service<K>) -> Router {
    Router::new()
        .route("/api/v1/employers", get(list_employers::<K>).post(create_employer::<K>))
        .route("/api/v1/employers/{id}", get(get_employer::<K>))
        .route("/api/v1/skills", get(list_skills::<K>).post(create_skill::<K>))
        .route("/api/v1/skills/{id}", get(get_skill::<K>))
        .route("/api/v1/projects", get(list_projects::<K>).post(create_project::<K>))
        .route("/api/v1/projects/{id}", get(get_project::<K>))
        .with_state(service)
}

// Employers

async fn list_employers<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
) -> Result<Json<Vec<Employer>>, ApiError> {
    service.list_employers().await.map(Json).map_err(domain_error)
}

async fn create_employer<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    body: Bytes,
) -> Result<Json<Employer>, ApiError> {
    let entry: NewCatalogEntry = require_json_body(&body, "Employer")?;
    service.create_employer(entry).await.map(Json).map_err(domain_error)
}

async fn get_employer<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Employer>, ApiError> {
    service.get_employer(path_id(id)?).await.map(Json).map_err(domain_error)
}

// Skills

async fn list_skills<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
) -> Result<Json<Vec<Skill>>, ApiError> {
    service.list_skills().await.map(Json).map_err(domain_error)
}

async fn create_skill<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    body: Bytes,
) -> Result<Json<Skill>, ApiError> {
    let entry: NewCatalogEntry = require_json_body(&body, "Skill")?;
    service.create_skill(entry).await.map(Json).map_err(domain_error)
}

async fn get_skill<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Skill>, ApiError> {
    service.get_skill(path_id(id)?).await.map(Json).map_err(domain_error)
}

// Projects

async fn list_projects<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    service.list_projects().await.map(Json).map_err(domain_error)
}

async fn create_project<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    body: Bytes,
) -> Result<Json<Project>, ApiError> {
    let project: NewProject = require_json_body(&body, "Project")?;
    service.create_project(project).await.map(Json).map_err(domain_error)
}

async fn get_project<K: CatalogRepository + 'static>(
    State(service): State<Service<K>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Project>, ApiError> {
    service.get_project(path_id(id)?).await.map(Json).map_err(domain_error)
}

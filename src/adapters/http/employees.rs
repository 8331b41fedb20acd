//! Employee routes.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error::{
    domain_error, invalid_argument, parse_json_body, path_id, query_params, require_json_body, ApiError,
};
use crate::domain::models::{Employee, EmployeeDetails, EmployeePatch};
use crate::domain::ports::{EmployeeCache, EmployeeRepository};
use crate::services::EmployeeService;

/// Query parameters for employee listing. At most one may be set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQueryParams {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employer_id: Option<i64>,
}

impl EmployeeQueryParams {
    fn filter_count(&self) -> usize {
        usize::from(self.email.is_some())
            + usize::from(self.department.is_some())
            + usize::from(self.employer_id.is_some())
    }
}

type Service<R, C> = Arc<EmployeeService<R, C>>;

pub fn routes<R, C>(service: Service<R, C>) -> Router
where
    R: EmployeeRepository + 'static,
    C: EmployeeCache + 'static,
{
    Router::new()
        .route(
            "/api/v1/employees",
            get(list_employees::<R, C>).post(create_employee::<R, C>),
        )
        .route(
            "/api/v1/employees/{id}",
            get(get_employee::<R, C>)
                .put(update_employee::<R, C>)
                .patch(patch_employee::<R, C>)
                .delete(delete_employee::<R, C>),
        )
        .with_state(service)
}

async fn list_employees<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    query: Result<Query<EmployeeQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let params = query_params(query)?;
    if params.filter_count() > 1 {
        return Err(invalid_argument(
            "Only one of email, department or employerId may be given",
        ));
    }

    let employees = if let Some(email) = &params.email {
        service
            .find_by_email(email)
            .await
            .map(|found| found.into_iter().collect())
    } else if let Some(department) = &params.department {
        service.find_by_department(department).await
    } else if let Some(employer_id) = params.employer_id {
        service.find_by_employer(employer_id).await
    } else {
        service.list_employees().await
    };

    employees.map(Json).map_err(domain_error)
}

async fn get_employee<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Employee>, ApiError> {
    let id = path_id(id)?;
    service.get_employee(id).await.map(Json).map_err(domain_error)
}

async fn create_employee<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    body: Bytes,
) -> Result<Json<Employee>, ApiError> {
    let details: EmployeeDetails = require_json_body(&body, "Employee details")?;
    service.create_employee(details).await.map(Json).map_err(domain_error)
}

async fn update_employee<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Employee>, ApiError> {
    let id = path_id(id)?;
    let details = parse_json_body::<EmployeeDetails>(&body)?;
    service.update_employee(id, details).await.map(Json).map_err(domain_error)
}

async fn patch_employee<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Employee>, ApiError> {
    let id = path_id(id)?;
    let patch = parse_json_body::<EmployeePatch>(&body)?;
    service.patch_employee(id, patch).await.map(Json).map_err(domain_error)
}

async fn delete_employee<R: EmployeeRepository + 'static, C: EmployeeCache + 'static>(
    State(service): State<Service<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    service.delete_employee(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

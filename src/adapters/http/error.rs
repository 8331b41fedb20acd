//! Error bodies and domain error mapping for the REST adapter.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::errors::DomainError;

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
        }),
    )
}

pub fn invalid_argument(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message.into())
}

/// Map a domain error onto a status code and error body.
pub fn domain_error(err: DomainError) -> ApiError {
    if err.is_not_found() {
        return api_error(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string());
    }

    match err {
        DomainError::InvalidArgument(msg) => invalid_argument(msg),
        DomainError::Conflict(msg) => api_error(StatusCode::CONFLICT, "CONFLICT", msg),
        other => {
            tracing::error!(error = %other, "request failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", other.to_string())
        }
    }
}

/// Unwrap a `{id}` path segment, turning axum's plain-text rejection into an error body.
pub fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| invalid_argument(rejection.body_text()))
}

/// Unwrap query parameters the same way.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| invalid_argument(rejection.body_text()))
}

/// Decode an optional JSON body.
///
/// An empty body and a literal `null` both decode to `None`; malformed JSON is
/// a 400 rather than axum's default 422 rejection.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body)
        .map_err(|e| invalid_argument(format!("Malformed request body: {e}")))
}

/// Decode a JSON body that must be present.
pub fn require_json_body<T: DeserializeOwned>(body: &Bytes, what: &str) -> Result<T, ApiError> {
    parse_json_body(body)?.ok_or_else(|| invalid_argument(format!("{what} cannot be null")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewCatalogEntry;

    #[test]
    fn test_domain_error_status_codes() {
        assert_eq!(domain_error(DomainError::EmployeeNotFound(1)).0, StatusCode::NOT_FOUND);
        assert_eq!(domain_error(DomainError::SkillNotFound(1)).0, StatusCode::NOT_FOUND);
        assert_eq!(domain_error(DomainError::InvalidArgument("x".into())).0, StatusCode::BAD_REQUEST);
        assert_eq!(domain_error(DomainError::Conflict("x".into())).0, StatusCode::CONFLICT);

        let (status, Json(body)) = domain_error(DomainError::DatabaseError("disk".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let (_, Json(body)) = domain_error(DomainError::EmployeeNotFound(42));
        assert_eq!(body.error, "Employee not found with id: 42");
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[test]
    fn test_parse_json_body_absent_forms() {
        for raw in ["", "  \n", "null"] {
            let parsed: Option<NewCatalogEntry> = parse_json_body(&Bytes::from(raw)).unwrap();
            assert!(parsed.is_none(), "{raw:?} should decode to None");
        }
    }

    #[test]
    fn test_parse_json_body_malformed_is_bad_request() {
        let err = parse_json_body::<NewCatalogEntry>(&Bytes::from("{\"name\":")).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = require_json_body::<NewCatalogEntry>(&Bytes::new(), "Employer").unwrap_err();
        assert_eq!(err.1 .0.error, "Employer cannot be null");
    }
}

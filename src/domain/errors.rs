//! Domain errors for the Roster employee records service.

use thiserror::Error;

/// Domain-level errors that can occur in the Roster system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Employee not found with id: {0}")]
    EmployeeNotFound(i64),

    #[error("Employer not found with id: {0}")]
    EmployerNotFound(i64),

    #[error("Skill not found with id: {0}")]
    SkillNotFound(i64),

    #[error("Project not found with id: {0}")]
    ProjectNotFound(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Returns true for any of the "lookup target absent" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound(_)
                | Self::EmployerNotFound(_)
                | Self::SkillNotFound(_)
                | Self::ProjectNotFound(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

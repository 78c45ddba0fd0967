// Central Error Type for the Application

use crate::domain::{DomainError, ProjectId};
use thiserror::Error;

/// Application-level error type
///
/// Every variant maps to a distinct outward signal in the HTTP adapter.
/// Event publishing failures are deliberately absent: they never leave the
/// service layer (see [`crate::port::PublishError`]).
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad input, caller's fault. Not retried.
    #[error("Validation error: {field} {reason}")]
    Validation { field: String, reason: String },

    /// Referenced project is missing or not visible to the caller.
    #[error("Invalid reference: project {project_id} does not exist")]
    InvalidReference { project_id: ProjectId },

    /// Entity is missing or not visible to the caller.
    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Storage failure (possibly transient).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The caller's deadline expired before the operation completed.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl AppError {
    pub fn not_found_project(id: ProjectId) -> Self {
        AppError::NotFound {
            entity: "project",
            id,
        }
    }

    pub fn not_found_task(id: i64) -> Self {
        AppError::NotFound { entity: "task", id }
    }

    /// Whether the caller may retry the whole request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Persistence(_) | AppError::Timeout(_))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidField { field, reason } => AppError::Validation {
                field: field.to_string(),
                reason,
            },
            DomainError::UnknownStatus(value) => AppError::Validation {
                field: "status".to_string(),
                reason: format!("unknown status '{}'", value),
            },
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_keeps_field_name() {
        let err: AppError = DomainError::InvalidField {
            field: "title",
            reason: "must not be empty".to_string(),
        }
        .into();

        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "title");
                assert_eq!(reason, "must not be empty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_status_maps_to_status_field() {
        let err: AppError = DomainError::UnknownStatus("archived".to_string()).into();
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(AppError::Persistence("disk".into()).is_retryable());
        assert!(AppError::Timeout("slow".into()).is_retryable());
        assert!(!AppError::InvalidReference { project_id: 1 }.is_retryable());
        assert!(!AppError::not_found_task(1).is_retryable());
    }
}

//! HTTP Error Mapping
//!
//! Maps application errors to status codes and a JSON error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use taskboard_core::error::AppError;
use tracing::error;

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub retryable: bool,
}

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Missing or blank `X-User-Id`
    Unauthenticated,
    /// Body, path or query could not be decoded
    Malformed(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

/// Status code for an application error
pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::InvalidReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

fn app_error_body(err: AppError) -> ErrorBody {
    let retryable = err.is_retryable();
    match err {
        AppError::Validation { field, reason } => ErrorBody {
            error: "validation",
            message: format!("{} {}", field, reason),
            field: Some(field),
            retryable,
        },
        AppError::InvalidReference { project_id } => ErrorBody {
            error: "invalid_reference",
            message: format!("project {} does not exist", project_id),
            field: Some("project_id".to_string()),
            retryable,
        },
        AppError::NotFound { entity, id } => ErrorBody {
            error: "not_found",
            message: format!("{} {} not found", entity, id),
            field: None,
            retryable,
        },
        AppError::Persistence(detail) => {
            // Storage details stay in the logs
            error!(error = %detail, "Request failed in persistence layer");
            ErrorBody {
                error: "persistence",
                message: "internal storage error".to_string(),
                field: None,
                retryable,
            }
        }
        AppError::Timeout(detail) => ErrorBody {
            error: "timeout",
            message: detail,
            field: None,
            retryable,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::App(err) => (status_for(&err), app_error_body(err)),
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: "unauthenticated",
                    message: "missing X-User-Id header".to_string(),
                    field: None,
                    retryable: false,
                },
            ),
            ApiError::Malformed(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation",
                    message,
                    field: None,
                    retryable: false,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Validation {
                    field: "title".into(),
                    reason: "must not be empty".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::InvalidReference { project_id: 7 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::not_found_task(3), StatusCode::NOT_FOUND),
            (
                AppError::Persistence("disk I/O error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Timeout("task create".into()), StatusCode::GATEWAY_TIMEOUT),
        ];

        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_persistence_detail_is_not_exposed() {
        let body = app_error_body(AppError::Persistence("UNIQUE constraint failed: x".into()));
        assert_eq!(body.error, "persistence");
        assert!(!body.message.contains("UNIQUE"));
        assert!(body.retryable);
    }

    #[test]
    fn test_validation_body_names_field() {
        let body = app_error_body(AppError::Validation {
            field: "status".into(),
            reason: "unknown status 'blocked'".into(),
        });
        assert_eq!(body.field.as_deref(), Some("status"));
        assert!(!body.retryable);
    }
}

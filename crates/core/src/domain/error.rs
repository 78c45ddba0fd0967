// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Unknown task status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Maximum length of short text fields (project name, task title)
pub const MAX_NAME_CHARS: usize = 200;

/// Maximum length of description fields
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

/// Require a non-empty value no longer than `MAX_NAME_CHARS` once trimmed
pub(crate) fn require_name(field: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    check_length(field, value, MAX_NAME_CHARS)
}

pub(crate) fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(DomainError::InvalidField {
            field,
            reason: format!("too long (max {} characters)", max),
        });
    }
    Ok(())
}

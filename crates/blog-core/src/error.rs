//! Domain-level error types.

use thiserror::Error;

/// A field-level constraint violated by a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: `{field}` {message}")]
pub struct ValidationError {
    /// Name of the offending field, as callers see it.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

/// Domain errors - failures surfaced by the post service.
///
/// A missing post is not represented here; lookups and updates return
/// `None` and deletes report a zero count.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(ValidationError),

    #[error("Invalid argument `{name}`: {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    #[error(transparent)]
    Store(RepoError),
}

impl DomainError {
    pub fn invalid_argument(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::Validation(err)
    }
}

/// Store errors pass through untouched, except validation failures which are
/// lifted so callers see the same variant whichever layer caught them.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(err) => DomainError::Validation(err),
            other => DomainError::Store(other),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database operation timed out: {0}")]
    Timeout(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

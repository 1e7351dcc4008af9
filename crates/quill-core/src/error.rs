//! Domain-level error types.

use thiserror::Error;

use crate::domain::Channel;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, key: String },

    /// A listing that must not be empty came back empty.
    #[error("{0}")]
    NoResults(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Persistence(String),

    #[error("{channel} notification failed: {source}")]
    Notification {
        channel: Channel,
        #[source]
        source: NotifyError,
    },
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

/// Failures raised by notification collaborators (SMTP, social APIs).
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote API rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Could not load recipients: {0}")]
    Recipients(#[from] RepoError),
}

/// Failures raised while storing uploaded images.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, RecordParseError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("malformed record in {source_name}: {error}")]
    MalformedRecord {
        source_name: String,
        error: RecordParseError,
    },

    #[error("person not found: {0}")]
    PersonNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

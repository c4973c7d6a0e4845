//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{}: {source}", path.display())]
    InvalidSource {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Load-time problems with the command sources or settings.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource { .. }
                | Self::Parse { .. }
                | Self::Config { .. }
                | Self::Domain(DomainError::InvalidCommand { .. })
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound(_)))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Cancelled))
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog and invocation rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid command '{command}' in category '{category}': {reason}")]
    InvalidCommand {
        category: String,
        command: String,
        reason: String,
    },

    #[error("command not found: {0}")]
    NotFound(String),

    #[error("cancelled")]
    Cancelled,
}

impl DomainError {
    pub(crate) fn invalid(
        category: &str,
        command: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCommand {
            category: category.to_string(),
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

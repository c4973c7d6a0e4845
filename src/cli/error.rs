//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::App(e) if e.is_configuration() => crate::exitcode::CONFIG,
            CliError::App(e) if e.is_not_found() => crate::exitcode::NOINPUT,
            CliError::App(e) if e.is_cancelled() => crate::exitcode::OK,
            CliError::App(ApplicationError::OperationFailed { .. }) => crate::exitcode::IOERR,
            CliError::App(_) => crate::exitcode::SOFTWARE,
        }
    }
}

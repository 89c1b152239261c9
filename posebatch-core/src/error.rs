// ============================================================================
// posebatch-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// Every fallible operation in posebatch-core returns `CoreResult<T>`. The
// CLI reuses the same error type so a failure anywhere in a batch surfaces
// with one consistent message at the top level.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The estimator variant name matched neither `demo` nor `demox`.
    #[error("Unknown demo file: {0}")]
    UnknownEstimator(String),

    #[error("Required external command '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Estimator '{variant}' failed on '{folder}' ({status})")]
    EstimatorFailed {
        variant: String,
        folder: String,
        status: ExitStatus,
    },

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error for `program`.
pub fn command_start_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(program.into(), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_estimator_message() {
        let err = CoreError::UnknownEstimator("unknown".to_string());
        assert_eq!(err.to_string(), "Unknown demo file: unknown");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn command_start_keeps_program_name() {
        let err = command_start_error("ffmpeg", io::Error::other("boom"));
        assert_eq!(err.to_string(), "Failed to start command 'ffmpeg': boom");
    }
}

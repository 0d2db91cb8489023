//! Unified error handling for tfward Core.
//!
//! This module provides a unified error type that wraps domain, application
//! and configuration errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, ConfigurationError};
use crate::domain::DomainError;

/// Root error type for tfward Core operations.
///
/// Errors are `Clone` so that a cached outcome (the version check) can be
/// handed to every caller that awaits it.
#[derive(Debug, Error, Clone)]
pub enum TfwardError {
    /// Errors from the domain layer (invalid values, incompatible versions).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (process and orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Missing or malformed configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TfwardError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in tfward".into(),
                "Please report this issue at: https://github.com/cosecruz/tfward/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
            },
            Self::Application(e) => e.category(),
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The exit code of the failed process, if this error is a non-zero exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Application(ApplicationError::ProcessExit { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Process,
    Internal,
}

/// Convenient result type alias.
pub type TfwardResult<T> = Result<T, TfwardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_keep_their_message() {
        let err: TfwardError = ConfigurationError::WorkspaceNotConfigured.into();
        assert_eq!(
            err.to_string(),
            "The workspace for the operation is not configured."
        );
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn exit_code_only_for_process_exit() {
        let exit: TfwardError = ApplicationError::ProcessExit {
            command: "terraform".into(),
            args: vec!["plan".into()],
            code: 1,
            stdout: None,
            stderr: None,
        }
        .into();
        assert_eq!(exit.exit_code(), Some(1));
        assert_eq!(exit.category(), ErrorCategory::Process);

        let internal = TfwardError::Internal {
            message: "x".into(),
        };
        assert_eq!(internal.exit_code(), None);
    }
}

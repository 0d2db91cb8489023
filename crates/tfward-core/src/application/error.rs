//! Application layer errors.
//!
//! These errors represent failures in orchestration (processes, workspace
//! switching, configuration lookups), not domain rules. Domain errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, TfwardError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A process exited with a non-zero code.
    #[error("`{command} {}` exited with code {code}", .args.join(" "))]
    ProcessExit {
        command: String,
        args: Vec<String>,
        code: i32,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    /// The process could not be started or its output could not be read.
    #[error("Failed to run `{program}`: {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The version report of the tool could not be understood.
    #[error("Could not determine the installed Terraform version: {reason}")]
    VersionProbe { reason: String },

    /// Switching back to the previous workspace failed.
    ///
    /// `operation_error` holds the error of the wrapped operation when it
    /// failed too, so neither failure is lost.
    #[error("Failed to switch back to Terraform workspace '{workspace}': {source}")]
    RestorationFailed {
        workspace: String,
        source: Box<TfwardError>,
        operation_error: Option<Box<TfwardError>>,
    },

    /// `terraform validate` or `terraform fmt -check` reported problems.
    #[error("Linting the Terraform project failed.")]
    LintFailed {
        #[source]
        source: Box<TfwardError>,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProcessExit { stderr, .. } => {
                let mut suggestions = vec!["Check the Terraform output above for details".into()];
                if let Some(stderr) = stderr.as_deref().filter(|s| !s.trim().is_empty()) {
                    suggestions.push(format!("Terraform said: {}", stderr.trim()));
                }
                suggestions
            }
            Self::SpawnFailed { program, .. } => vec![
                format!("Ensure `{}` is installed and in your PATH", program),
                "Check that the project directory exists".into(),
            ],
            Self::VersionProbe { .. } => vec![
                "Run `terraform -version -json` to check the installation".into(),
            ],
            Self::RestorationFailed {
                workspace,
                operation_error,
                ..
            } => {
                let mut suggestions = vec![format!(
                    "Run `terraform workspace select {}` to restore the previous workspace",
                    workspace
                )];
                if let Some(op) = operation_error {
                    suggestions.push(format!("The operation itself also failed: {}", op));
                }
                suggestions
            }
            Self::LintFailed { .. } => vec![
                "Run `terraform validate` to see validation errors".into(),
                "Run `terraform fmt -recursive` to fix formatting".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProcessExit { .. } | Self::LintFailed { .. } => ErrorCategory::Process,
            Self::SpawnFailed { .. } => ErrorCategory::NotFound,
            Self::VersionProbe { .. } | Self::RestorationFailed { .. } => ErrorCategory::Process,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}

/// Missing or malformed configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("The workspace for the operation is not configured.")]
    WorkspaceNotConfigured,

    #[error("The project path is not set.")]
    ProjectPathNotSet,

    #[error("Missing configuration value for '{key}'.")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to render configuration value '{key}': {reason}")]
    Render { key: String, reason: String },

    #[error("Failed to load configuration: {reason}")]
    Load { reason: String },
}

impl ConfigurationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WorkspaceNotConfigured => vec![
                "Set terraform.workspace in tfward.toml".into(),
                "Or export TFWARD__TERRAFORM__WORKSPACE".into(),
            ],
            Self::ProjectPathNotSet => vec!["Pass --project <DIR>".into()],
            Self::MissingKey { key } => vec![format!("Set '{}' in tfward.toml", key)],
            Self::InvalidValue { key, .. } | Self::Render { key, .. } => {
                vec![format!("Check the value of '{}' in your configuration", key)]
            }
            Self::Load { .. } => vec![
                "Check that tfward.toml is valid TOML".into(),
                "Run `tfward config path` to see which files are read".into(),
            ],
        }
    }
}

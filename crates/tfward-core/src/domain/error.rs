// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cached version outcomes are shared between callers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    #[error("Invalid workspace name '{value}': {reason}")]
    InvalidWorkspace { value: String, reason: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("Installed version {installed} is incompatible with required version {required}.")]
    IncompatibleVersion { installed: String, required: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidVersion { value, .. } => vec![
                format!("'{}' is not a semantic version", value),
                "Set terraform.version to a version such as 1.6.0, or to 'latest'".into(),
            ],
            Self::InvalidWorkspace { .. } => vec![
                "Workspace names must not be empty".into(),
                "Check terraform.workspace in your configuration".into(),
            ],
            Self::IncompatibleVersion {
                installed,
                required,
            } => vec![
                format!("Terraform {} is installed", installed),
                format!(
                    "Install a Terraform release >= {} within the same major version",
                    required
                ),
                "Or relax terraform.version in your configuration".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidVersion { .. } | Self::InvalidWorkspace { .. } => {
                ErrorCategory::Validation
            }
            Self::IncompatibleVersion { .. } => ErrorCategory::Compatibility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
}

// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for tfward.
//!
//! This module contains pure logic with no I/O: version compatibility,
//! spawn options, Terraform argument construction and exit-code outcomes.
//! Running processes and reading configuration are handled via ports
//! (traits) defined in the application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or configuration access
//! - **Immutable values**: All domain objects are Clone + PartialEq
pub mod commands;
pub mod error;
pub mod outcome;
pub mod spawn;
pub mod value_objects;

// Re-exports for convenience
pub use commands::{FmtOptions, InitOptions, Invocation, PlanOptions, SelectOptions};
pub use error::{DomainError, ErrorCategory};
pub use outcome::PlanOutcome;
pub use spawn::{Capture, LogLevel, Logging, SpawnOptions, SpawnedProcessResult, StreamLogging};
pub use value_objects::{RequiredVersion, ToolVersion, WorkspaceName};

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use super::*;

    fn tool(v: &str) -> ToolVersion {
        ToolVersion::from_str(v).unwrap()
    }

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn required_version_parses_latest() {
        assert_eq!(
            RequiredVersion::from_str("latest").unwrap(),
            RequiredVersion::Latest
        );
        assert_eq!(
            RequiredVersion::from_str(" LATEST ").unwrap(),
            RequiredVersion::Latest
        );
        assert_eq!(RequiredVersion::default(), RequiredVersion::Latest);
    }

    #[test]
    fn required_version_pads_partial_versions() {
        assert_eq!(
            RequiredVersion::from_str("1.5").unwrap().to_string(),
            "1.5.0"
        );
        assert_eq!(RequiredVersion::from_str("v1").unwrap().to_string(), "1.0.0");
        assert_eq!(RequiredVersion::from_str(" v1.5 ").unwrap().configured(), "v1.5");
        assert!(RequiredVersion::from_str("one.two").is_err());
    }

    #[test]
    fn latest_accepts_anything() {
        assert!(RequiredVersion::Latest.is_satisfied_by(&tool("0.1.0")));
        assert!(RequiredVersion::Latest.is_satisfied_by(&tool("99.0.0")));
    }

    #[test]
    fn pinned_requires_same_major_and_not_older() {
        let required = RequiredVersion::from_str("1.5.0").unwrap();

        assert!(required.is_satisfied_by(&tool("1.5.0")));
        assert!(required.is_satisfied_by(&tool("1.9.3")));
        assert!(!required.is_satisfied_by(&tool("1.4.9")));
        assert!(!required.is_satisfied_by(&tool("2.0.0")));
        assert!(!required.is_satisfied_by(&tool("0.15.0")));
    }

    #[test]
    fn pinned_zero_major_compares_within_major() {
        let required = RequiredVersion::from_str("0.12.0").unwrap();
        assert!(required.is_satisfied_by(&tool("0.13.1")));
        assert!(!required.is_satisfied_by(&tool("0.11.14")));
    }

    #[test]
    fn workspace_name_is_trimmed_and_non_empty() {
        assert_eq!(WorkspaceName::new(" dev \n").unwrap().as_str(), "dev");
        assert!(matches!(
            WorkspaceName::new("   "),
            Err(DomainError::InvalidWorkspace { .. })
        ));
    }

    #[test]
    fn incompatible_version_message() {
        let err = DomainError::IncompatibleVersion {
            installed: "1.2.0".into(),
            required: "2.0.0".into(),
        };
        assert_eq!(
            err.to_string(),
            "Installed version 1.2.0 is incompatible with required version 2.0.0."
        );
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    // ========================================================================
    // Spawn Option Tests
    // ========================================================================

    #[test]
    fn caller_options_override_defaults() {
        let defaults = SpawnOptions::default()
            .with_working_directory("/project")
            .with_logging(Logging::all(LogLevel::Debug));

        let merged = SpawnOptions::default().merged_over(&defaults);
        assert_eq!(merged.working_directory, Some(PathBuf::from("/project")));
        assert_eq!(merged.logging, Logging::all(LogLevel::Debug));

        let merged = SpawnOptions::default()
            .with_working_directory("/elsewhere")
            .with_logging(Logging::suppressed())
            .merged_over(&defaults);
        assert_eq!(merged.working_directory, Some(PathBuf::from("/elsewhere")));
        assert_eq!(merged.logging, Logging::suppressed());
    }

    // ========================================================================
    // Outcome Tests
    // ========================================================================

    #[test]
    fn detailed_exit_codes() {
        assert_eq!(
            PlanOutcome::from_detailed_exit_code(0),
            Some(PlanOutcome::NoChanges)
        );
        assert_eq!(
            PlanOutcome::from_detailed_exit_code(2),
            Some(PlanOutcome::Changes)
        );
        assert_eq!(PlanOutcome::from_detailed_exit_code(1), None);
        assert!(bool::from(PlanOutcome::Changes));
        assert!(!PlanOutcome::NoChanges.has_changes());
    }
}

//! Application layer for tfward.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TerraformService, VersionGate,
//!   ProjectLifecycle)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer: argument lists,
//! version rules and plan outcomes all live in `crate::domain`.

pub mod error;
pub mod interpret;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{
    PrepareOutcome, PrepareRequest, ProjectLifecycle, TerraformService, VersionGate,
    WorkspaceOperationOptions,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfigurationReader, Filesystem, ProcessRunner};

pub use error::{ApplicationError, ConfigurationError};

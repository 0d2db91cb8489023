//! tfward Core - supervised Terraform orchestration.
//!
//! This crate provides the domain and application layers for `tfward`, a
//! supervisory layer over the Terraform CLI, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tfward-cli (CLI)              │
//! │     (init, lint, prepare, deploy)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProjectLifecycle, TerraformService,    │
//! │  VersionGate, workspace operations)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ProcessRunner, ConfigurationReader,    │
//! │  Filesystem)                            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    tfward-adapters (Infrastructure)     │
//! │ (TokioProcessRunner, LayeredConfig...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (versions, spawn options, command       │
//! │  builders, plan outcomes)               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tfward_core::prelude::*;
//!
//! # async fn example(runner: Arc<dyn ProcessRunner>, config: &dyn ConfigurationReader) -> TfwardResult<()> {
//! let terraform = TerraformService::new(runner, config, Some("./infra".into()))?;
//!
//! let has_changes = terraform
//!     .wrap_workspace_operation(WorkspaceOperationOptions::default(), || async {
//!         let opts = PlanOptions::default();
//!         terraform
//!             .plan(Path::new("plan.out"), &opts, SpawnOptions::default())
//!             .await
//!     })
//!     .await?
//!     .has_changes();
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProjectLifecycle, TerraformService, VersionGate, WorkspaceOperationOptions,
        ports::{ConfigurationReader, Filesystem, ProcessRunner},
    };
    pub use crate::domain::{
        Capture, FmtOptions, InitOptions, Invocation, LogLevel, Logging, PlanOptions,
        PlanOutcome, RequiredVersion, SelectOptions, SpawnOptions, SpawnedProcessResult,
        StreamLogging, ToolVersion, WorkspaceName,
    };
    pub use crate::error::{TfwardError, TfwardResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application services - orchestrate use cases.
//!
//! `TerraformService` exposes the Terraform CLI behind the version gate,
//! `wrap_workspace_operation` scopes work to a workspace, and
//! `ProjectLifecycle` builds the project-level commands on top of both.

pub mod lifecycle;
pub mod terraform_service;
pub mod version_gate;
pub mod workspace_operation;

pub use lifecycle::{PrepareOutcome, PrepareRequest, ProjectLifecycle};
pub use terraform_service::TerraformService;
pub use version_gate::VersionGate;
pub use workspace_operation::WorkspaceOperationOptions;

//! Version Gate - cached Terraform compatibility check.
//!
//! Every Terraform invocation goes through [`VersionGate::ensure_compatible`]
//! first. The check runs at most once per gate: concurrent callers share the
//! single in-flight probe, and its outcome (including a failure) is kept for
//! the lifetime of the gate.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{DomainError, RequiredVersion, SpawnOptions, ToolVersion, commands},
    error::TfwardResult,
};

/// The subset of `terraform -version -json` we read.
#[derive(Debug, Deserialize)]
struct VersionReport {
    terraform_version: String,
}

/// Lazily checks that the installed Terraform satisfies the required version.
pub struct VersionGate {
    runner: Arc<dyn ProcessRunner>,
    program: String,
    required: RequiredVersion,
    probe_options: SpawnOptions,
    outcome: OnceCell<TfwardResult<()>>,
}

impl VersionGate {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        program: impl Into<String>,
        required: RequiredVersion,
        probe_options: SpawnOptions,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            required,
            probe_options,
            outcome: OnceCell::new(),
        }
    }

    pub fn required_version(&self) -> &RequiredVersion {
        &self.required
    }

    /// `None` until the check has completed, then whether it passed.
    pub fn is_compatible(&self) -> Option<bool> {
        self.outcome.get().map(Result::is_ok)
    }

    /// Succeeds when the installed version is compatible.
    ///
    /// With a `latest` requirement this never spawns a process.
    pub async fn ensure_compatible(&self) -> TfwardResult<()> {
        self.outcome.get_or_init(|| self.check()).await.clone()
    }

    #[instrument(skip(self), fields(required = %self.required))]
    async fn check(&self) -> TfwardResult<()> {
        if self.required.is_latest() {
            debug!("No Terraform version constraint configured");
            return Ok(());
        }

        let installed = self.probe().await?;
        if !self.required.is_satisfied_by(&installed) {
            return Err(DomainError::IncompatibleVersion {
                installed: installed.to_string(),
                required: self.required.configured().to_string(),
            }
            .into());
        }

        debug!(%installed, "Terraform version is compatible");
        Ok(())
    }

    async fn probe(&self) -> TfwardResult<ToolVersion> {
        let invocation = commands::version_probe(self.probe_options.clone());
        let result = self
            .runner
            .spawn(&self.program, &invocation.argv(), &invocation.options)
            .await?;

        let stdout = result.stdout.unwrap_or_default();
        let report: VersionReport =
            serde_json::from_str(&stdout).map_err(|e| ApplicationError::VersionProbe {
                reason: format!("unexpected version report: {e}"),
            })?;

        report
            .terraform_version
            .parse::<ToolVersion>()
            .map_err(|e| {
                ApplicationError::VersionProbe {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

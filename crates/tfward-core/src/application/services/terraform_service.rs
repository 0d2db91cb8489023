//! Terraform Service - the Terraform CLI behind typed operations.
//!
//! Every operation:
//! 1. Builds its invocation (`crate::domain::commands`)
//! 2. Waits for the version gate
//! 3. Runs `terraform` through the `ProcessRunner` port
//! 4. Interprets the result where the exit code carries meaning (`plan`)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, instrument};

use crate::{
    application::{
        ConfigurationError, interpret::interpret_plan, ports::ConfigurationReader,
        ports::ProcessRunner, services::VersionGate,
    },
    domain::{
        FmtOptions, InitOptions, Invocation, PlanOptions, PlanOutcome, RequiredVersion,
        SelectOptions, SpawnOptions, SpawnedProcessResult, WorkspaceName, commands,
    },
    error::TfwardResult,
};

/// A service exposing the Terraform CLI.
pub struct TerraformService {
    runner: Arc<dyn ProcessRunner>,
    gate: VersionGate,
    /// Applied under every caller's options; holds the project directory.
    default_spawn_options: SpawnOptions,
    /// Used by workspace operations when no workspace is given.
    default_workspace: Option<WorkspaceName>,
}

impl TerraformService {
    /// The executable spawned for every operation.
    pub const PROGRAM: &'static str = "terraform";

    pub const WORKSPACE_KEY: &'static str = "terraform.workspace";
    pub const VERSION_KEY: &'static str = "terraform.version";

    /// Create the service, reading `terraform.workspace` and
    /// `terraform.version` (default `latest`) once.
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        config: &dyn ConfigurationReader,
        project_path: Option<PathBuf>,
    ) -> TfwardResult<Self> {
        let default_workspace = config
            .get_string(Self::WORKSPACE_KEY)?
            .map(WorkspaceName::new)
            .transpose()?;

        let required = match config.get_string(Self::VERSION_KEY)? {
            Some(raw) => {
                RequiredVersion::from_str(&raw).map_err(|e| ConfigurationError::InvalidValue {
                    key: Self::VERSION_KEY.into(),
                    reason: e.to_string(),
                })?
            }
            None => RequiredVersion::Latest,
        };

        let default_spawn_options = SpawnOptions {
            working_directory: project_path,
            ..Default::default()
        };

        let gate = VersionGate::new(
            runner.clone(),
            Self::PROGRAM,
            required,
            default_spawn_options.clone(),
        );

        Ok(Self {
            runner,
            gate,
            default_spawn_options,
            default_workspace,
        })
    }

    pub fn required_version(&self) -> &RequiredVersion {
        self.gate.required_version()
    }

    pub fn version_gate(&self) -> &VersionGate {
        &self.gate
    }

    pub fn default_workspace(&self) -> Option<&WorkspaceName> {
        self.default_workspace.as_ref()
    }

    /// Runs an arbitrary Terraform command, after the version check.
    #[instrument(skip(self, args, options), fields(command = %command))]
    pub async fn terraform(
        &self,
        command: &str,
        args: &[String],
        options: SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult> {
        self.gate.ensure_compatible().await?;

        let options = options.merged_over(&self.default_spawn_options);
        let argv: Vec<String> = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect();
        debug!(args = ?argv, "Running terraform");

        self.runner.spawn(Self::PROGRAM, &argv, &options).await
    }

    async fn run(&self, invocation: Invocation) -> TfwardResult<SpawnedProcessResult> {
        self.terraform(&invocation.command, &invocation.args, invocation.options)
            .await
    }

    /// Runs `terraform init`.
    pub async fn init(&self, opts: InitOptions, options: SpawnOptions) -> TfwardResult<()> {
        self.run(commands::init(opts, options)).await?;
        Ok(())
    }

    /// Runs `terraform workspace show` and returns the selected workspace.
    pub async fn workspace_show(&self, options: SpawnOptions) -> TfwardResult<String> {
        let result = self.run(commands::workspace_show(options)).await?;
        Ok(result
            .stdout
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    /// Runs `terraform workspace select` to change the active workspace.
    pub async fn workspace_select(
        &self,
        workspace: &WorkspaceName,
        opts: SelectOptions,
        options: SpawnOptions,
    ) -> TfwardResult<()> {
        self.run(commands::workspace_select(workspace, opts, options))
            .await?;
        Ok(())
    }

    /// A `workspace select` that borrows nothing from the service, so it can
    /// outlive the caller. The version gate is not consulted.
    pub(crate) fn detached_workspace_select(
        &self,
        workspace: &WorkspaceName,
        options: SpawnOptions,
    ) -> BoxFuture<'static, TfwardResult<()>> {
        let invocation = commands::workspace_select(
            workspace,
            SelectOptions::default(),
            options.merged_over(&self.default_spawn_options),
        );
        let runner = self.runner.clone();
        async move {
            runner
                .spawn(Self::PROGRAM, &invocation.argv(), &invocation.options)
                .await?;
            Ok(())
        }
        .boxed()
    }

    /// Runs `terraform plan` and writes the plan to `out`.
    ///
    /// Returns whether the plan contains changes.
    pub async fn plan(
        &self,
        out: &Path,
        opts: &PlanOptions,
        options: SpawnOptions,
    ) -> TfwardResult<PlanOutcome> {
        interpret_plan(self.run(commands::plan(out, opts, options)).await)
    }

    /// Runs `terraform apply` on a previously written plan.
    pub async fn apply(&self, plan: &Path, options: SpawnOptions) -> TfwardResult<()> {
        self.run(commands::apply(plan, options)).await?;
        Ok(())
    }

    /// Runs `terraform show` on a plan and returns its description.
    pub async fn show(&self, path: &Path, options: SpawnOptions) -> TfwardResult<String> {
        let result = self.run(commands::show(path, options)).await?;
        Ok(result.stdout.unwrap_or_default())
    }

    /// Runs `terraform validate`.
    pub async fn validate(&self, options: SpawnOptions) -> TfwardResult<()> {
        self.run(commands::validate(options)).await?;
        Ok(())
    }

    /// Runs `terraform fmt`. The raw result is returned; deciding whether a
    /// check failure is a lint failure is up to the caller.
    pub async fn fmt(
        &self,
        opts: &FmtOptions,
        options: SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult> {
        self.run(commands::fmt(opts, options)).await
    }
}

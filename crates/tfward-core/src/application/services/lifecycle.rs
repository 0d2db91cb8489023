//! Project Lifecycle - the project-level commands.
//!
//! Each operation is a short script over [`TerraformService`]: initializing
//! the project, upgrading providers, linting, and the two-step
//! prepare/deploy flow through a plan file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, ConfigurationError, TerraformService, WorkspaceOperationOptions,
        ports::{ConfigurationReader, Filesystem},
    },
    domain::{
        FmtOptions, InitOptions, LogLevel, Logging, PlanOptions, SpawnOptions, StreamLogging,
    },
    error::{TfwardError, TfwardResult},
};

/// Directory created by `terraform init` inside the project.
const TERRAFORM_DIR: &str = ".terraform";

/// Plan file written by `prepare` when no output is given.
pub const DEFAULT_PLAN_FILE: &str = "plan.out";

const PROJECT_NAME_KEY: &str = "project.name";
const ADDITIONAL_DIRECTORIES_KEY: &str = "project.additional_directories";
const VARIABLES_KEY: &str = "infrastructure.variables";

/// Input for [`ProjectLifecycle::prepare`].
#[derive(Debug, Clone, Default)]
pub struct PrepareRequest {
    /// Where to write the plan. Defaults to [`DEFAULT_PLAN_FILE`].
    pub output: Option<PathBuf>,
    /// Plan the destruction of every resource.
    pub destroy: bool,
    /// Render the plan when it has changes.
    pub print: bool,
}

/// Result of [`ProjectLifecycle::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOutcome {
    /// Absolute path of the written plan.
    pub output: PathBuf,
    pub is_deployment_needed: bool,
    /// `terraform show` output, when requested and the plan has changes.
    pub rendered_plan: Option<String>,
}

pub struct ProjectLifecycle {
    terraform: TerraformService,
    filesystem: Arc<dyn Filesystem>,
    config: Arc<dyn ConfigurationReader>,
    project_path: Option<PathBuf>,
}

impl ProjectLifecycle {
    pub fn new(
        terraform: TerraformService,
        filesystem: Arc<dyn Filesystem>,
        config: Arc<dyn ConfigurationReader>,
        project_path: Option<PathBuf>,
    ) -> Self {
        Self {
            terraform,
            filesystem,
            config,
            project_path,
        }
    }

    pub fn terraform(&self) -> &TerraformService {
        &self.terraform
    }

    fn project_path(&self) -> TfwardResult<&Path> {
        self.project_path
            .as_deref()
            .ok_or_else(|| ConfigurationError::ProjectPathNotSet.into())
    }

    fn project_name(&self) -> TfwardResult<Option<String>> {
        self.config.get_string(PROJECT_NAME_KEY)
    }

    /// Run `terraform init`, wiping the `.terraform` directory first when
    /// `force` is set.
    #[instrument(skip(self))]
    pub async fn init(&self, force: bool) -> TfwardResult<()> {
        if force {
            info!("Removing Terraform folder.");
            let dir = self.project_path()?.join(TERRAFORM_DIR);
            self.filesystem.remove_dir_all(&dir)?;
        }

        info!(
            "Initializing Terraform for project '{}'.",
            self.project_name()?.unwrap_or_default()
        );
        self.terraform
            .init(
                InitOptions::default(),
                SpawnOptions::default().with_logging(Logging::all(LogLevel::Debug)),
            )
            .await?;

        info!("Successfully initialized Terraform.");
        Ok(())
    }

    /// Run `terraform init -upgrade`, which refreshes the lock file.
    ///
    /// Always reports that dependencies may have changed.
    #[instrument(skip(self))]
    pub async fn update_dependencies(&self) -> TfwardResult<bool> {
        info!("Updating Terraform dependencies.");
        self.terraform
            .init(
                InitOptions { upgrade: true },
                SpawnOptions::default().with_logging(Logging::all(LogLevel::Debug)),
            )
            .await?;

        info!("Successfully updated Terraform dependencies.");
        Ok(true)
    }

    /// Run `terraform validate`, then check formatting of the project and
    /// of `project.additional_directories`.
    #[instrument(skip(self))]
    pub async fn lint(&self) -> TfwardResult<()> {
        let project_path = self.project_path()?;
        let project_name = self.project_name()?.unwrap_or_default();

        let mut targets = vec![project_path.to_path_buf()];
        targets.extend(
            self.config
                .get_string_list(ADDITIONAL_DIRECTORIES_KEY)?
                .into_iter()
                .map(|dir| project_path.join(dir)),
        );

        let result = async {
            info!("Validating Terraform code for project '{}'.", project_name);
            self.terraform
                .validate(SpawnOptions::default().with_logging(Logging::streams(
                    StreamLogging::Suppressed,
                    StreamLogging::Level(LogLevel::Info),
                )))
                .await?;

            info!(
                "Checking format of Terraform code for project '{}'.",
                project_name
            );
            let opts = FmtOptions {
                check: true,
                recursive: true,
                targets,
            };
            self.terraform
                .fmt(
                    &opts,
                    SpawnOptions::default().with_logging(Logging::all(LogLevel::Info)),
                )
                .await?;
            Ok::<_, TfwardError>(())
        }
        .await;

        match result {
            Ok(()) => {
                info!("Terraform code passed linting.");
                Ok(())
            }
            Err(e @ TfwardError::Application(ApplicationError::ProcessExit { .. })) => {
                Err(ApplicationError::LintFailed {
                    source: Box::new(e),
                }
                .into())
            }
            Err(e) => Err(e),
        }
    }

    /// Write a plan for the configured workspace.
    ///
    /// The workspace is created if needed, unless destroying.
    #[instrument(skip(self))]
    pub async fn prepare(&self, request: PrepareRequest) -> TfwardResult<PrepareOutcome> {
        self.project_path()?;
        let project_name = self.config.get_string_or_throw(PROJECT_NAME_KEY)?;

        let variables = self
            .config
            .get_and_render_map(VARIABLES_KEY)?
            .unwrap_or_default();
        let output = resolve(
            request
                .output
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_PLAN_FILE)),
        )?;

        info!(
            "Planning Terraform deployment for project '{}'.",
            project_name
        );

        let opts = PlanOptions {
            destroy: request.destroy,
            variables,
        };
        let outcome = self
            .terraform
            .wrap_workspace_operation(
                WorkspaceOperationOptions {
                    create_workspace_if_needed: !request.destroy,
                    ..Default::default()
                },
                || {
                    self.terraform
                        .plan(&output, &opts, SpawnOptions::default())
                },
            )
            .await?;

        let is_deployment_needed = outcome.has_changes();
        let rendered_plan = if is_deployment_needed {
            info!("Terraform plan has changes that can be deployed.");
            if request.print {
                Some(self.terraform.show(&output, SpawnOptions::default()).await?)
            } else {
                None
            }
        } else {
            info!("Terraform plan has no change.");
            None
        };

        Ok(PrepareOutcome {
            output,
            is_deployment_needed,
            rendered_plan,
        })
    }

    /// Apply a plan written by [`prepare`](Self::prepare), then delete it.
    #[instrument(skip(self))]
    pub async fn deploy(&self, plan: &Path) -> TfwardResult<()> {
        self.project_path()?;
        let project_name = self.config.get_string_or_throw(PROJECT_NAME_KEY)?;

        info!("Applying Terraform plan for project '{}'.", project_name);

        let plan = resolve(plan)?;
        self.terraform
            .run_in_default_workspace(|| {
                self.terraform.apply(
                    &plan,
                    SpawnOptions::default().with_logging(Logging::all(LogLevel::Info)),
                )
            })
            .await?;

        info!("Successfully applied Terraform plan.");
        self.filesystem.remove_file(&plan)
    }
}

/// Make `path` absolute against the current directory.
fn resolve(path: &Path) -> TfwardResult<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

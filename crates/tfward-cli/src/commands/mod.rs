//! Command handlers, one module per subcommand.
//!
//! Handlers receive owned values from `main::run` and report through the
//! [`OutputManager`](crate::output::OutputManager).

use std::sync::Arc;

use tfward_adapters::{LocalFilesystem, TokioProcessRunner};
use tfward_core::application::{
    ConfigurationReader, Filesystem, ProcessRunner, ProjectLifecycle, TerraformService,
};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod dependencies_update;
pub mod deploy;
pub mod init;
pub mod lint;
pub mod prepare;
pub mod workspace;

/// Wire the production adapters into a [`ProjectLifecycle`].
pub(crate) fn lifecycle(config: &AppConfig) -> CliResult<ProjectLifecycle> {
    let runner: Arc<dyn ProcessRunner> = Arc::new(TokioProcessRunner::new());
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let settings: Arc<dyn ConfigurationReader> = config.settings.clone();

    let terraform = TerraformService::new(runner, settings.as_ref(), config.project_dir.clone())?;

    Ok(ProjectLifecycle::new(
        terraform,
        filesystem,
        settings,
        config.project_dir.clone(),
    ))
}

//! `tfward deploy`: apply a plan written by `tfward prepare`.

use crate::{cli::DeployArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub async fn execute(args: DeployArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let lifecycle = super::lifecycle(&config)?;

    output.info(&format!("Applying {}", args.plan.display()))?;
    lifecycle.deploy(&args.plan).await?;

    output.success("Deployment finished")?;
    Ok(())
}

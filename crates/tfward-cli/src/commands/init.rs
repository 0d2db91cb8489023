//! `tfward init`: initialise Terraform in the project.

use crate::{cli::InitArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub async fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let lifecycle = super::lifecycle(&config)?;

    if args.force {
        output.warning("Removing .terraform before initialising")?;
    }
    lifecycle.init(args.force).await?;

    output.success("Terraform initialised")?;
    Ok(())
}

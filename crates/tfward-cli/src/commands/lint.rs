//! `tfward lint`

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub async fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    super::lifecycle(&config)?.lint().await?;
    output.success("Configuration is valid and formatted")?;
    Ok(())
}

//! `tfward dependencies-update`: upgrade providers and modules.

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub async fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let lifecycle = super::lifecycle(&config)?;

    if lifecycle.update_dependencies().await? {
        output.success("Providers and modules upgraded")?;
    } else {
        output.info("Nothing to upgrade")?;
    }
    Ok(())
}

//! `tfward workspace`: workspace inspection.

use tfward_core::domain::SpawnOptions;

use crate::{
    cli::{OutputFormat, WorkspaceCommands},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(
    cmd: WorkspaceCommands,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        WorkspaceCommands::Show => {
            let lifecycle = super::lifecycle(&config)?;
            let current = lifecycle
                .terraform()
                .workspace_show(SpawnOptions::default())
                .await?;
            let configured = lifecycle
                .terraform()
                .default_workspace()
                .map(|w| w.as_str().to_string());

            if output.format() == OutputFormat::Json {
                output.json(&serde_json::json!({
                    "current": current,
                    "configured": configured,
                }))?;
            } else {
                output.print(&current)?;
                if let Some(configured) = configured.filter(|c| c != &current) {
                    output.info(&format!("Operations run in '{configured}'"))?;
                }
            }
        }
    }
    Ok(())
}

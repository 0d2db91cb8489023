//! `tfward config`: inspect the merged configuration.

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            let snapshot = config.settings.snapshot()?;
            if output.format() == OutputFormat::Json {
                output.json(&snapshot)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&snapshot).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            if let Some(global) = AppConfig::global_config_path() {
                output.print(&format!("global: {}", global.display()))?;
            }
            if config.settings.files().is_empty() {
                output.info("No configuration files found")?;
            }
            for file in config.settings.files() {
                output.print(&file.display().to_string())?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<serde_json::Value> {
    config
        .settings
        .get_value(key)?
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

/// Strings print bare; tables and lists as TOML.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tfward_adapters::LayeredConfiguration;

    use super::*;

    fn config(toml: &str) -> AppConfig {
        AppConfig {
            project_dir: None,
            settings: Arc::new(LayeredConfiguration::from_toml_str(toml).unwrap()),
        }
    }

    #[test]
    fn get_known_key() {
        let cfg = config("[terraform]\nworkspace = \"dev\"\n");
        assert_eq!(
            get_config_value(&cfg, "terraform.workspace").unwrap(),
            serde_json::json!("dev")
        );
    }

    #[test]
    fn version_defaults_to_latest() {
        let cfg = config("");
        assert_eq!(
            get_config_value(&cfg, "terraform.version").unwrap(),
            serde_json::json!("latest")
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = config("");
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn display_strings_bare_and_lists_inline() {
        assert_eq!(display_value(&serde_json::json!("dev")), "dev");
        assert_eq!(display_value(&serde_json::json!(["a", "b"])), r#"["a","b"]"#);
    }
}

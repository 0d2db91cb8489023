//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. It
//! resolves the project directory and builds the layered configuration the
//! core services read from.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `TFWARD__*` environment variables (`TFWARD__TERRAFORM__WORKSPACE=dev`)
//! 2. The file passed with `--config`
//! 3. `tfward.toml` in the project directory
//! 4. The user-level file (see [`AppConfig::global_config_path`])
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tfward_adapters::configuration::{LayeredConfiguration, PROJECT_FILE_NAME};
use tfward_core::application::ConfigurationReader;

use crate::cli::global::GlobalArgs;
use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The Terraform project, if one was given or found.
    pub project_dir: Option<PathBuf>,
    /// The merged configuration document.
    pub settings: Arc<LayeredConfiguration>,
}

impl AppConfig {
    /// Resolve the project and load every configuration layer.
    pub fn load(args: &GlobalArgs) -> CliResult<Self> {
        let cwd = std::env::current_dir()?;
        let project_dir = resolve_project_dir(args.project.as_deref(), &cwd)?;

        let global = Self::global_config_path();
        let settings = LayeredConfiguration::for_project(
            global.as_deref(),
            project_dir.as_deref(),
            args.config.as_deref(),
        )?;

        Ok(Self {
            project_dir,
            settings: Arc::new(settings),
        })
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tfward", "tfward")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// `output.no_color = true` in any configuration layer.
    pub fn no_color(&self) -> bool {
        matches!(
            self.settings.get_string("output.no_color"),
            Ok(Some(value)) if value == "true"
        )
    }
}

/// An explicit directory must exist; otherwise the current directory is the
/// project when it holds a `tfward.toml`.
fn resolve_project_dir(explicit: Option<&Path>, cwd: &Path) -> CliResult<Option<PathBuf>> {
    match explicit {
        Some(dir) => {
            let dir = cwd.join(dir);
            if !dir.is_dir() {
                return Err(CliError::InvalidInput {
                    message: format!("Project directory '{}' does not exist", dir.display()),
                    source: None,
                });
            }
            Ok(Some(dir))
        }
        None if cwd.join(PROJECT_FILE_NAME).is_file() => Ok(Some(cwd.to_path_buf())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_project_is_joined_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("infra")).unwrap();

        let resolved = resolve_project_dir(Some(Path::new("infra")), dir.path()).unwrap();
        assert_eq!(resolved, Some(dir.path().join("infra")));
    }

    #[test]
    fn missing_explicit_project_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_project_dir(Some(Path::new("nope")), dir.path());
        assert!(matches!(result, Err(CliError::InvalidInput { .. })));
    }

    #[test]
    fn cwd_with_tfward_toml_is_the_project() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_project_dir(None, dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(PROJECT_FILE_NAME), "").unwrap();
        assert_eq!(
            resolve_project_dir(None, dir.path()).unwrap(),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn global_config_path_is_named_config_toml() {
        if let Some(path) = AppConfig::global_config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}

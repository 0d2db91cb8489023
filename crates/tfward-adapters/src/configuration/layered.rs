//! Layered configuration built with the `config` crate.
//!
//! Later layers override earlier ones:
//!
//! 1. Built-in defaults (`terraform.version = "latest"`)
//! 2. Configuration files, in the order they were added
//! 3. `TFWARD__*` environment variables (`TFWARD__TERRAFORM__WORKSPACE`)
//! 4. Explicit overrides

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat, Value};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use tfward_core::{
    application::{ConfigurationError, ports::ConfigurationReader},
    error::TfwardResult,
};

use super::render::{Resolve, render};

/// Name of the project configuration file.
pub const PROJECT_FILE_NAME: &str = "tfward.toml";

/// Prefix of the environment variables read as configuration.
pub const ENV_PREFIX: &str = "TFWARD";

/// Separates the prefix and nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// The merged configuration document.
#[derive(Debug, Clone)]
pub struct LayeredConfiguration {
    config: Config,
    files: Vec<PathBuf>,
}

/// Builder for [`LayeredConfiguration`].
#[derive(Debug, Default)]
pub struct LayeredConfigurationBuilder {
    files: Vec<(PathBuf, bool)>,
    overrides: Vec<(String, String)>,
    skip_environment: bool,
}

impl LayeredConfigurationBuilder {
    /// Read `path` if it exists.
    pub fn optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), false));
        self
    }

    /// Read `path`, failing when it is missing.
    pub fn required_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), true));
        self
    }

    /// Set `key` over every other layer.
    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Ignore `TFWARD__*` variables.
    pub fn without_environment(mut self) -> Self {
        self.skip_environment = true;
        self
    }

    #[instrument(skip(self))]
    pub fn build(self) -> TfwardResult<LayeredConfiguration> {
        let mut builder = Config::builder()
            .set_default("terraform.version", "latest")
            .map_err(load_error)?;

        let mut files = Vec::new();
        for (path, required) in self.files {
            if !required && !path.is_file() {
                debug!(path = %path.display(), "Configuration file not found, skipping");
                continue;
            }
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(required));
            files.push(path);
        }

        if !self.skip_environment {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            );
        }

        for (key, value) in self.overrides {
            builder = builder.set_override(key, value).map_err(load_error)?;
        }

        let config = builder.build().map_err(load_error)?;
        Ok(LayeredConfiguration { config, files })
    }
}

impl LayeredConfiguration {
    pub fn builder() -> LayeredConfigurationBuilder {
        LayeredConfigurationBuilder::default()
    }

    /// The usual layering for a project: an optional user-level file, the
    /// project's `tfward.toml`, then an explicit file if given.
    pub fn for_project(
        global_file: Option<&Path>,
        project_dir: Option<&Path>,
        explicit_file: Option<&Path>,
    ) -> TfwardResult<Self> {
        let mut builder = Self::builder();
        if let Some(global) = global_file {
            builder = builder.optional_file(global);
        }
        if let Some(dir) = project_dir {
            builder = builder.optional_file(dir.join(PROJECT_FILE_NAME));
        }
        if let Some(explicit) = explicit_file {
            builder = builder.required_file(explicit);
        }
        builder.build()
    }

    /// Parse a single TOML document on top of the defaults.
    pub fn from_toml_str(toml: &str) -> TfwardResult<Self> {
        let config = Config::builder()
            .set_default("terraform.version", "latest")
            .map_err(load_error)?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(load_error)?;
        Ok(Self {
            config,
            files: Vec::new(),
        })
    }

    /// Files that contributed to this configuration, lowest priority first.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Raw value at `key`, tables and lists included.
    pub fn get_value(&self, key: &str) -> TfwardResult<Option<serde_json::Value>> {
        match self.config.get::<serde_json::Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(invalid_value(key, e)),
        }
    }

    /// The whole merged document.
    pub fn snapshot(&self) -> TfwardResult<serde_json::Value> {
        self.config
            .clone()
            .try_deserialize::<serde_json::Value>()
            .map_err(|e| load_error(e).into())
    }
}

impl ConfigurationReader for LayeredConfiguration {
    fn get_string(&self, key: &str) -> TfwardResult<Option<String>> {
        match self.config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(invalid_value(key, e)),
        }
    }

    fn get_string_list(&self, key: &str) -> TfwardResult<Vec<String>> {
        match self.config.get::<Vec<String>>(key) {
            Ok(values) => Ok(values),
            Err(ConfigError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(invalid_value(key, e)),
        }
    }

    fn get_and_render_map(&self, key: &str) -> TfwardResult<Option<IndexMap<String, String>>> {
        let table = match self.config.get_table(key) {
            Ok(table) => table,
            Err(ConfigError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(invalid_value(key, e)),
        };

        let mut rendered = IndexMap::with_capacity(table.len());
        for (name, value) in table {
            let entry_key = format!("{key}.{name}");
            let raw = Value::into_string(value).map_err(|e| invalid_value(&entry_key, e))?;
            let value = render(&raw, self).map_err(|reason| ConfigurationError::Render {
                key: entry_key,
                reason,
            })?;
            rendered.insert(name, value);
        }
        Ok(Some(rendered))
    }
}

impl Resolve for LayeredConfiguration {
    fn configuration(&self, key: &str) -> Result<String, String> {
        match self.config.get_string(key) {
            Ok(value) => Ok(value),
            Err(ConfigError::NotFound(_)) => Err(format!("configuration '{key}' is not set")),
            Err(e) => Err(e.to_string()),
        }
    }
}

fn load_error(e: ConfigError) -> ConfigurationError {
    ConfigurationError::Load {
        reason: e.to_string(),
    }
}

fn invalid_value(key: &str, e: ConfigError) -> tfward_core::error::TfwardError {
    ConfigurationError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    }
    .into()
}

//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `tfward-adapters` crate provides implementations.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::Path;

use crate::application::ConfigurationError;
use crate::domain::{SpawnOptions, SpawnedProcessResult};
use crate::error::TfwardResult;

/// Port for running external processes.
///
/// Implemented by:
/// - `tfward_adapters::process::TokioProcessRunner` (production)
///
/// ## Contract
///
/// - A non-zero exit MUST be reported as
///   `ApplicationError::ProcessExit`, carrying the code and the original
///   program and arguments, so callers can special-case specific codes.
/// - Failing to start the process is `ApplicationError::SpawnFailed`.
/// - Streams are only returned when `options.capture` asks for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        options: &SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult>;
}

/// Port for reading the merged, layered configuration document.
///
/// Implemented by:
/// - `tfward_adapters::config::LayeredConfiguration`
pub trait ConfigurationReader: Send + Sync {
    /// Look up a string value. Missing keys are `Ok(None)`.
    fn get_string(&self, key: &str) -> TfwardResult<Option<String>>;

    /// Look up a list of strings. Missing keys are an empty list.
    fn get_string_list(&self, key: &str) -> TfwardResult<Vec<String>>;

    /// Look up a table and expand the templates in each of its values.
    /// Entries keep the order they were declared in.
    fn get_and_render_map(&self, key: &str) -> TfwardResult<Option<IndexMap<String, String>>>;

    /// Like [`get_string`](Self::get_string), failing when the key is absent.
    fn get_string_or_throw(&self, key: &str) -> TfwardResult<String> {
        self.get_string(key)?.ok_or_else(|| {
            ConfigurationError::MissingKey {
                key: key.to_string(),
            }
            .into()
        })
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tfward_adapters::filesystem::LocalFilesystem` (production)
/// - `tfward_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Remove a directory and all contents. A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> TfwardResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> TfwardResult<()>;
}

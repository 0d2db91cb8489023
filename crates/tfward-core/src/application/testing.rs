//! In-crate fakes for the ports, shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::application::ApplicationError;
use crate::application::ports::{ConfigurationReader, ProcessRunner};
use crate::domain::{SpawnOptions, SpawnedProcessResult};
use crate::error::TfwardResult;

/// A recorded `spawn` call.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

impl Call {
    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

#[derive(Debug, Default)]
struct FakeState {
    workspace: String,
    installed: String,
    calls: Vec<Call>,
    exit_codes: Vec<(String, i32)>,
    stdout: Vec<(String, String)>,
}

/// A stateful stand-in for the Terraform binary.
///
/// Tracks the selected workspace, answers the version probe, and fails any
/// command line starting with a registered prefix.
#[derive(Debug)]
pub(crate) struct FakeTerraform {
    state: Mutex<FakeState>,
    delay: Option<Duration>,
}

impl FakeTerraform {
    pub fn new(workspace: &str) -> Self {
        Self {
            state: Mutex::new(FakeState {
                workspace: workspace.to_string(),
                installed: "1.6.3".into(),
                ..Default::default()
            }),
            delay: None,
        }
    }

    pub fn installed(self, version: &str) -> Self {
        self.state.lock().unwrap().installed = version.to_string();
        self
    }

    /// Exit with `code` for every command line starting with `prefix`.
    pub fn exit_with(self, prefix: &str, code: i32) -> Self {
        self.state
            .lock()
            .unwrap()
            .exit_codes
            .push((prefix.to_string(), code));
        self
    }

    pub fn stdout(self, prefix: &str, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .stdout
            .push((prefix.to_string(), text.to_string()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(Call::line).collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }

    pub fn workspace(&self) -> String {
        self.state.lock().unwrap().workspace.clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeTerraform {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        options: &SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        let line = args.join(" ");
        state.calls.push(Call {
            program: program.to_string(),
            args: args.to_vec(),
            options: options.clone(),
        });

        let code = state
            .exit_codes
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map_or(0, |(_, code)| *code);
        if code != 0 {
            return Err(ApplicationError::ProcessExit {
                command: program.to_string(),
                args: args.to_vec(),
                code,
                stdout: None,
                stderr: Some(format!("{line} failed")),
            }
            .into());
        }

        let scripted = state
            .stdout
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, text)| text.clone());

        let stdout = if line.starts_with("-version") {
            format!(r#"{{"terraform_version":"{}","platform":"linux_amd64"}}"#, state.installed)
        } else if line == "workspace show" {
            format!("{}\n", state.workspace)
        } else {
            if line.starts_with("workspace select") {
                if let Some(name) = args.last() {
                    state.workspace = name.clone();
                }
            }
            scripted.unwrap_or_default()
        };

        Ok(SpawnedProcessResult {
            code: 0,
            stdout: options.capture.stdout.then_some(stdout),
            stderr: options.capture.stderr.then(String::new),
        })
    }
}

/// A fixed configuration document.
#[derive(Debug, Default)]
pub(crate) struct StaticConfig {
    strings: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
    maps: HashMap<String, IndexMap<String, String>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.strings.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_list(mut self, key: &str, values: &[&str]) -> Self {
        self.lists
            .insert(key.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_map(mut self, key: &str, entries: &[(&str, &str)]) -> Self {
        self.maps.insert(
            key.to_string(),
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }
}

impl ConfigurationReader for StaticConfig {
    fn get_string(&self, key: &str) -> TfwardResult<Option<String>> {
        Ok(self.strings.get(key).cloned())
    }

    fn get_string_list(&self, key: &str) -> TfwardResult<Vec<String>> {
        Ok(self.lists.get(key).cloned().unwrap_or_default())
    }

    fn get_and_render_map(&self, key: &str) -> TfwardResult<Option<IndexMap<String, String>>> {
        Ok(self.maps.get(key).cloned())
    }
}

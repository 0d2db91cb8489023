//! Spawn options and raw process results.
//!
//! These types describe *how* a Terraform subcommand should be run (working
//! directory, which streams are captured, where each stream is logged) and
//! what came back. They are passed unchanged to the `ProcessRunner` port.

use std::path::PathBuf;

/// Severity a process output stream is forwarded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Routing of a single output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamLogging {
    /// Use the runner's default level.
    #[default]
    Inherit,
    Level(LogLevel),
    /// Do not log the stream at all.
    Suppressed,
}

/// Per-stream log routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Logging {
    pub stdout: StreamLogging,
    pub stderr: StreamLogging,
}

impl Logging {
    /// Route both streams to the same level.
    pub fn all(level: LogLevel) -> Self {
        Self::streams(StreamLogging::Level(level), StreamLogging::Level(level))
    }

    /// Silence both streams.
    pub fn suppressed() -> Self {
        Self::streams(StreamLogging::Suppressed, StreamLogging::Suppressed)
    }

    pub fn streams(stdout: StreamLogging, stderr: StreamLogging) -> Self {
        Self { stdout, stderr }
    }

    /// `true` when the caller did not express any preference.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// Which output streams are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capture {
    pub stdout: bool,
    pub stderr: bool,
}

impl Capture {
    pub fn both() -> Self {
        Self {
            stdout: true,
            stderr: true,
        }
    }
}

/// Options for spawning a process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnOptions {
    pub working_directory: Option<PathBuf>,
    pub capture: Capture,
    pub logging: Logging,
}

impl SpawnOptions {
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_capture(mut self, capture: Capture) -> Self {
        self.capture = capture;
        self
    }

    /// Fill every field the caller left unset from `defaults`.
    pub fn merged_over(self, defaults: &SpawnOptions) -> SpawnOptions {
        SpawnOptions {
            working_directory: self
                .working_directory
                .or_else(|| defaults.working_directory.clone()),
            capture: Capture {
                stdout: self.capture.stdout || defaults.capture.stdout,
                stderr: self.capture.stderr || defaults.capture.stderr,
            },
            logging: if self.logging.is_unset() {
                defaults.logging
            } else {
                self.logging
            },
        }
    }
}

/// The outcome of a process that exited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnedProcessResult {
    pub code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl SpawnedProcessResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn with_stdout(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            code,
            stdout: Some(stdout.into()),
            stderr: None,
        }
    }
}

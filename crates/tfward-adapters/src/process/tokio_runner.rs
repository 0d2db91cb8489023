//! Process runner on top of `tokio::process`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info, instrument, trace, warn};

use tfward_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{LogLevel, SpawnOptions, SpawnedProcessResult, StreamLogging},
    error::TfwardResult,
};

/// Spawns child processes, forwarding their output to `tracing` line by line.
///
/// Streams left at [`StreamLogging::Inherit`] are logged at
/// [`TokioProcessRunner::DEFAULT_LEVEL`].
#[derive(Debug, Clone, Copy)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

    pub fn new() -> Self {
        Self
    }

    fn route(&self, logging: StreamLogging) -> Option<LogLevel> {
        match logging {
            StreamLogging::Inherit => Some(Self::DEFAULT_LEVEL),
            StreamLogging::Level(level) => Some(level),
            StreamLogging::Suppressed => None,
        }
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    #[instrument(skip(self, args, options), fields(program = %program))]
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        options: &SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &options.working_directory {
            cmd.current_dir(dir);
        }

        let spawn_failed = |reason: String| ApplicationError::SpawnFailed {
            program: program.to_string(),
            reason,
        };

        let mut child = cmd.spawn().map_err(|e| spawn_failed(e.to_string()))?;
        debug!(pid = child.id(), "Spawned process");

        let stdout = pump(
            child.stdout.take(),
            "stdout",
            self.route(options.logging.stdout),
            options.capture.stdout,
        );
        let stderr = pump(
            child.stderr.take(),
            "stderr",
            self.route(options.logging.stderr),
            options.capture.stderr,
        );
        let (stdout, stderr, status) = tokio::join!(stdout, stderr, child.wait());

        let status = status.map_err(|e| spawn_failed(e.to_string()))?;
        let stdout = stdout.map_err(|e| spawn_failed(format!("reading stdout: {e}")))?;
        let stderr = stderr.map_err(|e| spawn_failed(format!("reading stderr: {e}")))?;

        // Killed by a signal: no exit code.
        let code = status.code().unwrap_or(-1);
        debug!(code, "Process exited");

        if code != 0 {
            return Err(ApplicationError::ProcessExit {
                command: program.to_string(),
                args: args.to_vec(),
                code,
                stdout,
                stderr,
            }
            .into());
        }

        Ok(SpawnedProcessResult {
            code,
            stdout,
            stderr,
        })
    }
}

/// Read `reader` to the end, logging each line at `level` and keeping the
/// output unchanged when `capture` is set.
///
/// Captured output is only altered when it is not valid UTF-8.
async fn pump<R>(
    reader: Option<R>,
    stream: &'static str,
    level: Option<LogLevel>,
    capture: bool,
) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(capture.then(String::new));
    };

    let mut reader = BufReader::new(reader);
    let mut captured = capture.then(Vec::new);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        if let Some(level) = level {
            let text = String::from_utf8_lossy(&line);
            log_line(level, stream, text.trim_end_matches(['\n', '\r']));
        }
        if let Some(buffer) = captured.as_mut() {
            buffer.extend_from_slice(&line);
        }
    }

    Ok(captured.map(|bytes| {
        String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }))
}

fn log_line(level: LogLevel, stream: &'static str, line: &str) {
    match level {
        LogLevel::Trace => trace!(target: "tfward::process", stream, "{}", line),
        LogLevel::Debug => debug!(target: "tfward::process", stream, "{}", line),
        LogLevel::Info => info!(target: "tfward::process", stream, "{}", line),
        LogLevel::Warn => warn!(target: "tfward::process", stream, "{}", line),
        LogLevel::Error => error!(target: "tfward::process", stream, "{}", line),
    }
}

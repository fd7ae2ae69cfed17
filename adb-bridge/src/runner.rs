use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::{
    constants::DEFAULT_ADB_PROGRAM,
    errors::{BridgeError, Result},
    utils::render_command_line,
};

/// Captured result of a finished bridge invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code of the process, `None` if it was terminated by a signal
    pub code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best human readable explanation of a failed invocation.
    ///
    /// `adb` reports most errors on stderr, but some subcommands (`pull` on
    /// older releases, `root`) write them to stdout instead.
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes the bridge tool.
///
/// Implementations receive the argument vector without the program name and
/// return once the process has exited. A non-zero exit status is not an
/// error at this level; callers decide what a failure means for them.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<CommandOutput>;
}

/// [`CommandRunner`] spawning the real `adb` executable.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Creates a runner for `program`.
    ///
    /// `timeout` bounds every single invocation. `None` waits for as long as
    /// the process runs, which hangs the caller if the device stops
    /// responding.
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_ADB_PROGRAM, None)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(
        level = "debug",
        name = "adb_command",
        skip_all,
        fields(program = %self.program.display())
    )]
    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        let command_line = render_command_line(&self.program.to_string_lossy(), args);
        debug!("Running `{command_line}`");
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!("Failed to launch `{command_line}`: {e}");
                BridgeError::TransportUnavailable {
                    command: command_line.clone(),
                    reason: e.to_string(),
                }
            })?;
        // Dropping the wait future on timeout drops the child, which kills it.
        let waited = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| {
                    error!("`{command_line}` timed out after {timeout:?}");
                    BridgeError::CommandTimedOut {
                        command: command_line.clone(),
                        timeout,
                    }
                })?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|source| BridgeError::OutputError {
            command: command_line.clone(),
            source,
        })?;
        debug!("`{command_line}` exited with {}", output.status);
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

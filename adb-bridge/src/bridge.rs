use std::{path::Path, time::Duration};

use tracing::{debug, error, instrument, warn};

use crate::{
    constants::{
        DEFAULT_ADB_PROGRAM, DEVICES, FIND, PULL, ROOT, ROOT_REFUSED_MARKER, SERIAL_FLAG, SHELL,
        START_SERVER,
    },
    errors::{BridgeError, Result},
    runner::{CommandOutput, CommandRunner, ProcessRunner},
    utils::{parse_device_list, parse_file_listing, render_command_line},
};

/// Handle on the bridge tool.
///
/// Every method maps to exactly one invocation of the tool and blocks the
/// calling task until it has exited. Device scoped methods always pass the
/// serial explicitly so that a second device plugged in mid-run is never
/// addressed by accident.
#[derive(Debug, Clone)]
pub struct Adb<R = ProcessRunner> {
    runner: R,
    /// Program name rendered into error messages
    program: String,
}

impl Adb<ProcessRunner> {
    /// Creates a handle spawning `program` for every command, each bounded by
    /// `timeout`.
    pub fn with_program(program: impl AsRef<Path>, timeout: Option<Duration>) -> Self {
        let program = program.as_ref();
        Self {
            runner: ProcessRunner::new(program, timeout),
            program: program.to_string_lossy().into_owned(),
        }
    }
}

impl<R: CommandRunner> Adb<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            program: DEFAULT_ADB_PROGRAM.to_string(),
        }
    }

    /// Program name used when rendering failed command lines.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Starts the host side ADB server, a no-op if it is already running.
    ///
    /// # Errors
    ///
    /// * `BridgeError::TransportUnavailable` - If the tool cannot be launched or exits non-zero
    #[instrument(level = "debug", skip(self))]
    pub async fn start_server(&self) -> Result<()> {
        let args = vec![START_SERVER.to_string()];
        let output = self.runner.run(&args).await?;
        if !output.success() {
            error!("Failed to start ADB server: {}", output.failure_reason());
            return Err(self.unavailable(&args, &output));
        }
        Ok(())
    }

    /// Lists the serials of all devices in the `device` state.
    ///
    /// # Errors
    ///
    /// * `BridgeError::TransportUnavailable` - If `adb devices` fails
    /// * `BridgeError::NoDeviceConnected` - If no device is in the `device` state
    #[instrument(level = "debug", skip(self))]
    pub async fn list_devices(&self) -> Result<Vec<String>> {
        let args = vec![DEVICES.to_string()];
        let output = self.runner.run(&args).await?;
        if !output.success() {
            error!("Failed to fetch connected devices: {}", output.failure_reason());
            return Err(self.unavailable(&args, &output));
        }
        let connected = parse_device_list(&output.stdout);
        debug!("Connected devices: {connected:?}");
        if connected.is_empty() {
            return Err(BridgeError::NoDeviceConnected);
        }
        Ok(connected)
    }

    /// Copies `remote_path` on `device` to `local_path` on the host.
    ///
    /// # Errors
    ///
    /// * `BridgeError::PullFailed` - If `adb pull` exits non-zero
    #[instrument(level = "debug", skip(self, local_path), fields(local_path = %local_path.display()))]
    pub async fn pull_file(&self, device: &str, remote_path: &str, local_path: &Path) -> Result<()> {
        let args = device_args(
            device,
            [PULL, remote_path, local_path.to_string_lossy().as_ref()],
        );
        let output = self.runner.run(&args).await?;
        if !output.success() {
            warn!("ADB pull failed for {remote_path}: {}", output.failure_reason());
            return Err(BridgeError::PullFailed {
                remote_path: remote_path.to_string(),
                reason: output.failure_reason(),
            });
        }
        Ok(())
    }

    /// Recursively lists the regular files below `remote_dir` on `device`.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// * `BridgeError::RemoteListFailed` - If the remote `find` exits non-zero
    #[instrument(level = "debug", skip(self))]
    pub async fn list_remote_files(&self, device: &str, remote_dir: &str) -> Result<Vec<String>> {
        let args = device_args(device, [SHELL, FIND, remote_dir, "-type", "f"]);
        let output = self.runner.run(&args).await?;
        if !output.success() {
            warn!(
                "Failed to list directory contents for {remote_dir}: {}",
                output.failure_reason()
            );
            return Err(BridgeError::RemoteListFailed {
                remote_dir: remote_dir.to_string(),
                reason: output.failure_reason(),
            });
        }
        Ok(parse_file_listing(&output.stdout))
    }

    /// Runs `argv` through the device shell and returns its outcome without
    /// judging the exit status.
    #[instrument(level = "debug", skip(self))]
    pub async fn run_remote_shell(&self, device: &str, argv: &[&str]) -> Result<CommandOutput> {
        let args = device_args(device, std::iter::once(SHELL).chain(argv.iter().copied()));
        self.runner.run(&args).await
    }

    /// Restarts the device daemon with root privileges.
    ///
    /// Production builds answer with "adbd cannot run as root in production
    /// builds" and a zero exit status, which is reported as a failure too.
    ///
    /// # Errors
    ///
    /// * `BridgeError::RootRestartFailed` - If the daemon refused or the command failed
    #[instrument(level = "debug", skip(self))]
    pub async fn root(&self, device: &str) -> Result<()> {
        let args = device_args(device, [ROOT]);
        let output = self.runner.run(&args).await?;
        if !output.success() || output.stdout.contains(ROOT_REFUSED_MARKER) {
            return Err(BridgeError::RootRestartFailed {
                reason: output.failure_reason(),
            });
        }
        Ok(())
    }

    fn unavailable(&self, args: &[String], output: &CommandOutput) -> BridgeError {
        BridgeError::TransportUnavailable {
            command: render_command_line(&self.program, args),
            reason: output.failure_reason(),
        }
    }
}

fn device_args<'a>(device: &'a str, rest: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    [SERIAL_FLAG, device]
        .into_iter()
        .chain(rest)
        .map(str::to_string)
        .collect()
}

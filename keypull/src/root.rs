use std::{fmt, io::Write, time::Duration};

use adb_bridge::{Adb, CommandRunner};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    constants::SU_PROBE,
    errors::{Result, RunError},
};

/// How root access was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMethod {
    /// The device daemon was restarted with root privileges.
    AdbDaemon,
    /// The daemon stayed unprivileged but `su` is available on the device.
    SuperUser,
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdbDaemon => write!(f, "ADB"),
            Self::SuperUser => write!(f, "SU"),
        }
    }
}

/// Obtains root access on `device`.
///
/// `adb root` is tried first; on success the daemon restarts, so the call
/// waits `settle_delay` before returning. Otherwise `su -c id` is run
/// through the remote shell and a zero exit status confirms root access
/// without any delay.
///
/// # Errors
///
/// * `RunError::RootUnavailable` - If both strategies fail
/// * `RunError::Output` - If writing to `out` fails
#[instrument(level = "debug", skip(adb, out))]
pub async fn obtain_root<R, W>(
    adb: &Adb<R>,
    device: &str,
    settle_delay: Duration,
    out: &mut W,
) -> Result<RootMethod>
where
    R: CommandRunner,
    W: Write,
{
    let daemon_error = match adb.root(device).await {
        Ok(()) => {
            info!("adbd restarting as root, waiting {settle_delay:?}");
            tokio::time::sleep(settle_delay).await;
            writeln!(out, "Obtained root via ADB")?;
            return Ok(RootMethod::AdbDaemon);
        }
        Err(e) => e,
    };
    writeln!(out, "{daemon_error}")?;
    writeln!(out, "Attempting via SU")?;
    let su_failure = match adb.run_remote_shell(device, SU_PROBE).await {
        Ok(output) if output.success() => {
            writeln!(out, "Obtained root via SU")?;
            return Ok(RootMethod::SuperUser);
        }
        Ok(output) => output.failure_reason(),
        Err(e) => e.to_string(),
    };
    warn!("Root unavailable: {daemon_error}; su: {su_failure}");
    Err(RunError::RootUnavailable {
        adb_root: daemon_error.to_string(),
        su: su_failure,
    })
}

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("ADB is not available, `{command}` failed: {reason}")]
    TransportUnavailable { command: String, reason: String },
    #[error("Could not find any connected devices via ADB")]
    NoDeviceConnected,
    #[error("Device {device} is not connected, connected devices: {connected:?}")]
    DeviceNotFound {
        device: String,
        connected: Vec<String>,
    },
    #[error("ADB pull failed for {remote_path}: {reason}")]
    PullFailed { remote_path: String, reason: String },
    #[error("Failed to list directory contents for {remote_dir}: {reason}")]
    RemoteListFailed { remote_dir: String, reason: String },
    #[error("ADB root failed: {reason}")]
    RootRestartFailed { reason: String },
    #[error("`{command}` did not finish within {timeout:?}")]
    CommandTimedOut { command: String, timeout: Duration },
    #[error("Failed to collect output of `{command}`")]
    OutputError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

use std::path::PathBuf;

use adb_bridge::BridgeError;
use keybox::KeyboxError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

/// Failure of a single location. The run continues with the next one.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("Downloaded keybox failed validation: {0}")]
    InvalidKeybox(#[from] KeyboxError),
    #[error("Failed to write progress output")]
    Output(#[from] std::io::Error),
}

/// Failure aborting the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("ADB connection failed: {0}")]
    Connection(#[from] BridgeError),
    #[error("Root access required but not available ({adb_root}; su: {su}). Please root your device or enable root access in Developer Options")]
    RootUnavailable { adb_root: String, su: String },
    #[error("Could not create output directory {}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write progress output")]
    Output(#[from] std::io::Error),
}

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use keybox::{CountPolicy, ParseReport};
use serde::Serialize;

use crate::{constants::DEFAULT_OUTPUT_DIR, location::LocationKind, root::RootMethod};

/// Options for an extraction run
#[derive(Debug, Default, Clone)]
pub struct ExtractOptions {
    /// Optional output directory. If `None`, uses `output`. Relative paths
    /// resolve against the working directory
    pub output_dir: Option<PathBuf>,
    /// Optional device serial. If `None`, uses the first connected device
    pub device: Option<String>,
    /// Optional wait after `adb root`. If `None`, uses the default settle delay
    pub settle_delay: Option<Duration>,
    /// Handling of declared counts when validating keyboxes
    pub count_policy: CountPolicy,
    /// Write `manifest.json` into the output directory after the run
    pub write_manifest: bool,
}

impl ExtractOptions {
    /// Output directory as requested, `output` when none was given.
    pub fn requested_output_dir(&self) -> &Path {
        self.output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR))
    }

    /// Absolute output directory for this run.
    pub fn resolve_output_dir(&self) -> std::io::Result<PathBuf> {
        let output_dir = self.requested_output_dir();
        if output_dir.is_absolute() {
            Ok(output_dir.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(output_dir))
        }
    }
}

/// A remote file copied into the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PulledArtifact {
    pub remote_path: String,
    pub local_path: PathBuf,
    /// Summary of the file if it validated as a keybox
    pub keybox: Option<ParseReport>,
}

/// Result of a location that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationOutcome {
    pub kind: LocationKind,
    /// Files pulled for this location, possibly none for an empty directory
    pub artifacts: Vec<PulledArtifact>,
}

/// What an extraction run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub device: String,
    pub root_method: RootMethod,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Number of locations attempted
    pub attempted: usize,
    /// Locations that succeeded, in probing order
    pub successes: Vec<String>,
    /// Every file pulled, in pull order
    pub artifacts: Vec<PulledArtifact>,
    /// Where the manifest was written, if requested and written
    pub manifest_path: Option<PathBuf>,
}

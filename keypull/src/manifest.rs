use std::{
    fs,
    path::{Path, PathBuf},
};

use keybox::ParseReport;
use serde::Serialize;
use tracing::instrument;

use crate::{constants::MANIFEST_FILE_NAME, root::RootMethod, types::PulledArtifact};

/// Record of an extraction run, written as `manifest.json`.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub device: &'a str,
    pub root_method: RootMethod,
    pub successful_locations: &'a [String],
    pub artifacts: Vec<ArtifactEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ArtifactEntry<'a> {
    pub remote_path: &'a str,
    pub local_path: &'a Path,
    pub size: u64,
    /// BLAKE3 digest of the pulled file, hex encoded
    pub blake3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keybox: Option<&'a ParseReport>,
}

impl<'a> ArtifactEntry<'a> {
    /// Hashes the pulled file behind `artifact`.
    pub fn from_artifact(artifact: &'a PulledArtifact) -> std::io::Result<Self> {
        let contents = fs::read(&artifact.local_path)?;
        Ok(Self {
            remote_path: &artifact.remote_path,
            local_path: &artifact.local_path,
            size: contents.len() as u64,
            blake3: blake3::hash(&contents).to_hex().to_string(),
            keybox: artifact.keybox.as_ref(),
        })
    }
}

/// Writes the manifest into `output_dir` and returns its path.
///
/// Artifacts are hashed as they are on disk now, so a file overwritten by a
/// later location (`keybox.xml` pulled twice) is recorded with its final
/// contents under every entry.
#[instrument(level = "debug", skip_all, fields(output_dir = %output_dir.display()))]
pub fn write_manifest(
    output_dir: &Path,
    device: &str,
    root_method: RootMethod,
    successful_locations: &[String],
    artifacts: &[PulledArtifact],
) -> std::io::Result<PathBuf> {
    let manifest = Manifest {
        device,
        root_method,
        successful_locations,
        artifacts: artifacts
            .iter()
            .map(ArtifactEntry::from_artifact)
            .collect::<std::io::Result<_>>()?,
    };
    let path = output_dir.join(MANIFEST_FILE_NAME);
    fs::write(&path, serde_json::to_vec_pretty(&manifest)?)?;
    Ok(path)
}

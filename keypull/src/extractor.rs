use std::{
    io::Write,
    path::{Path, PathBuf},
};

use adb_bridge::{Adb, CommandRunner};
use keybox::CountPolicy;
use tracing::{debug, instrument};

use crate::{
    constants::{KEYBOX_FILE_NAME, KEYSTORE_FILE_NAME},
    errors::ExtractError,
    location::{flatten_remote_path, looks_like_keybox, LocationKind},
    types::{LocationOutcome, PulledArtifact},
};

type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction session bound to one device and one output directory.
pub struct Extractor<'a, R> {
    adb: &'a Adb<R>,
    device: String,
    output_dir: PathBuf,
    count_policy: CountPolicy,
}

impl<'a, R: CommandRunner> Extractor<'a, R> {
    /// Creates a session. `output_dir` must already exist.
    pub fn new(
        adb: &'a Adb<R>,
        device: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        count_policy: CountPolicy,
    ) -> Self {
        Self {
            adb,
            device: device.into(),
            output_dir: output_dir.into(),
            count_policy,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Extracts whatever `location` holds into the output directory.
    ///
    /// Keybox files are pulled to `keybox.xml` and must validate. Keystore
    /// databases are pulled to `persistent.sqlite`. Directories are listed
    /// recursively and every file is pulled under its flattened remote path;
    /// a file that fails to pull is reported and skipped, and files that look
    /// like keyboxes are validated opportunistically.
    ///
    /// # Errors
    ///
    /// * `ExtractError::Bridge` - If the pull of a file location or the listing of a directory fails
    /// * `ExtractError::InvalidKeybox` - If a pulled keybox file does not validate
    /// * `ExtractError::Output` - If writing to `out` fails
    #[instrument(level = "debug", skip(self, out), fields(device = %self.device))]
    pub async fn extract_from_location<W: Write>(
        &self,
        location: &str,
        out: &mut W,
    ) -> Result<LocationOutcome> {
        let kind = LocationKind::classify(location);
        debug!("Extracting {location} as {kind}");
        let artifacts = match kind {
            LocationKind::KeyboxFile => vec![self.pull_keybox(location, out).await?],
            LocationKind::KeystoreFile => vec![self.pull_keystore(location, out).await?],
            LocationKind::DirectoryTree => self.pull_directory(location, out).await?,
        };
        Ok(LocationOutcome { kind, artifacts })
    }

    async fn pull_keybox<W: Write>(&self, remote_path: &str, out: &mut W) -> Result<PulledArtifact> {
        let local_path = self.output_dir.join(KEYBOX_FILE_NAME);
        self.adb
            .pull_file(&self.device, remote_path, &local_path)
            .await?;
        writeln!(out, "Keybox extracted: {}", local_path.display())?;
        let report = keybox::validate(&local_path, self.count_policy)?;
        write!(out, "{report}")?;
        Ok(PulledArtifact {
            remote_path: remote_path.to_string(),
            local_path,
            keybox: Some(report),
        })
    }

    async fn pull_keystore<W: Write>(
        &self,
        remote_path: &str,
        out: &mut W,
    ) -> Result<PulledArtifact> {
        let local_path = self.output_dir.join(KEYSTORE_FILE_NAME);
        self.adb
            .pull_file(&self.device, remote_path, &local_path)
            .await?;
        writeln!(out, "Keystore extracted: {}", local_path.display())?;
        Ok(PulledArtifact {
            remote_path: remote_path.to_string(),
            local_path,
            keybox: None,
        })
    }

    async fn pull_directory<W: Write>(
        &self,
        remote_dir: &str,
        out: &mut W,
    ) -> Result<Vec<PulledArtifact>> {
        let remote_files = self
            .adb
            .list_remote_files(&self.device, remote_dir)
            .await?;
        debug!("Found {} files in {remote_dir}", remote_files.len());
        let mut artifacts = Vec::with_capacity(remote_files.len());
        for remote_path in remote_files {
            let local_path = self.output_dir.join(flatten_remote_path(&remote_path));
            if let Err(e) = self
                .adb
                .pull_file(&self.device, &remote_path, &local_path)
                .await
            {
                writeln!(out, "Failed to pull {remote_path}: {e}")?;
                continue;
            }
            // Files that merely look like keyboxes are kept even when invalid.
            let keybox = if looks_like_keybox(&remote_path) {
                keybox::validate(&local_path, self.count_policy).ok()
            } else {
                None
            };
            if let Some(report) = &keybox {
                writeln!(out, "Keybox located: {}", local_path.display())?;
                write!(out, "{report}")?;
            }
            artifacts.push(PulledArtifact {
                remote_path,
                local_path,
                keybox,
            });
        }
        Ok(artifacts)
    }
}

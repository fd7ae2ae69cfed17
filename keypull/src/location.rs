use std::fmt;

use crate::constants::{KEYBOX_MARKER, SQLITE_SUFFIX, XML_SUFFIX};

/// What a candidate location holds, decided by its suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// A single keybox XML file, pulled and validated.
    KeyboxFile,
    /// A single keystore database, pulled as-is.
    KeystoreFile,
    /// A directory whose files are pulled one by one.
    DirectoryTree,
}

impl LocationKind {
    /// Classifies `location`. Every path maps to exactly one kind.
    ///
    /// # Example
    ///
    /// ```
    /// use keypull::location::LocationKind;
    ///
    /// assert_eq!(LocationKind::classify("/data/keybox.xml"), LocationKind::KeyboxFile);
    /// assert_eq!(LocationKind::classify("/data/keystore.sqlite"), LocationKind::KeystoreFile);
    /// assert_eq!(LocationKind::classify("/data/misc/keystore"), LocationKind::DirectoryTree);
    /// ```
    pub fn classify(location: &str) -> Self {
        if location.ends_with(XML_SUFFIX) {
            Self::KeyboxFile
        } else if location.ends_with(SQLITE_SUFFIX) {
            Self::KeystoreFile
        } else {
            Self::DirectoryTree
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyboxFile => write!(f, "keybox file"),
            Self::KeystoreFile => write!(f, "keystore file"),
            Self::DirectoryTree => write!(f, "directory"),
        }
    }
}

/// Flattens a remote path into a single local file name by replacing every
/// `/` with `_`, so `/data/misc/keystore/persistent.sqlite` becomes
/// `_data_misc_keystore_persistent.sqlite`.
pub fn flatten_remote_path(remote_path: &str) -> String {
    remote_path.replace('/', "_")
}

/// Whether a file found inside a directory location is worth validating as
/// a keybox.
pub fn looks_like_keybox(remote_path: &str) -> bool {
    remote_path.contains(KEYBOX_MARKER) || remote_path.ends_with(XML_SUFFIX)
}

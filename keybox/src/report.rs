use std::fmt;

use serde::Serialize;

use crate::{
    constants::UNKNOWN_ALGORITHM,
    types::{Attestation, Key, Keybox},
};

/// Structural summary of a validated keybox file.
///
/// The `Display` implementation renders the summary printed when a keybox
/// is found:
///
/// ```text
/// Keyboxes found: 1
/// Keybox 1 - Device ID: dev1
///   Key 1: Algorithm=ecdsa, Certificates=2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Declared `NumberOfKeyboxes`
    pub number_of_keyboxes: i64,
    pub keyboxes: Vec<KeyboxSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboxSummary {
    pub device_id: String,
    pub keys: Vec<KeySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySummary {
    pub algorithm: String,
    /// Declared `NumberOfCertificates`
    pub certificate_count: i64,
}

impl From<&Attestation> for ParseReport {
    fn from(attestation: &Attestation) -> Self {
        Self {
            number_of_keyboxes: attestation.number_of_keyboxes,
            keyboxes: attestation.keyboxes.iter().map(KeyboxSummary::from).collect(),
        }
    }
}

impl From<&Keybox> for KeyboxSummary {
    fn from(keybox: &Keybox) -> Self {
        Self {
            device_id: keybox.device_id.clone(),
            keys: keybox.keys.iter().map(KeySummary::from).collect(),
        }
    }
}

impl From<&Key> for KeySummary {
    fn from(key: &Key) -> Self {
        Self {
            algorithm: key.algorithm.clone(),
            certificate_count: key.certificate_chain.number_of_certificates,
        }
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keyboxes found: {}", self.number_of_keyboxes)?;
        for (index, keybox) in self.keyboxes.iter().enumerate() {
            writeln!(f, "Keybox {} - Device ID: {}", index + 1, keybox.device_id)?;
            for (key_index, key) in keybox.keys.iter().enumerate() {
                let algorithm = if key.algorithm.is_empty() {
                    UNKNOWN_ALGORITHM
                } else {
                    &key.algorithm
                };
                writeln!(
                    f,
                    "  Key {}: Algorithm={algorithm}, Certificates={}",
                    key_index + 1,
                    key.certificate_count
                )?;
            }
        }
        Ok(())
    }
}

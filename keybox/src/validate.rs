use std::{fs, path::Path};

use tracing::{instrument, warn};

use crate::{
    constants::{NUMBER_OF_CERTIFICATES, NUMBER_OF_KEYBOXES},
    errors::{KeyboxError, Result},
    parser::parse_attestation,
    report::ParseReport,
    types::Attestation,
};

/// How declared counts relate to the entries that follow them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountPolicy {
    /// Counts are informational and may disagree with the document.
    #[default]
    Lenient,
    /// `NumberOfKeyboxes` and every `NumberOfCertificates` must equal the
    /// number of entries actually present.
    Strict,
}

impl CountPolicy {
    /// Checks `attestation` against this policy.
    ///
    /// # Errors
    ///
    /// * `KeyboxError::CountMismatch` - If the policy is strict and a declared count is wrong
    pub fn check(self, attestation: &Attestation) -> Result<()> {
        if self == Self::Lenient {
            return Ok(());
        }
        ensure_count(
            NUMBER_OF_KEYBOXES,
            attestation.number_of_keyboxes,
            attestation.keyboxes.len(),
        )?;
        attestation
            .keyboxes
            .iter()
            .flat_map(|keybox| &keybox.keys)
            .try_for_each(|key| {
                let chain = &key.certificate_chain;
                ensure_count(
                    NUMBER_OF_CERTIFICATES,
                    chain.number_of_certificates,
                    chain.certificates.len(),
                )
            })
    }
}

fn ensure_count(element: &'static str, declared: i64, actual: usize) -> Result<()> {
    if usize::try_from(declared).ok() != Some(actual) {
        warn!("{element} declares {declared} entries but {actual} are present");
        return Err(KeyboxError::CountMismatch {
            element,
            declared,
            actual,
        });
    }
    Ok(())
}

/// Reads and parses the keybox file at `path`.
///
/// # Errors
///
/// * `KeyboxError::FileUnreadable` - If the file is missing or cannot be read
/// * `KeyboxError::InvalidEncoding` - If the file is not UTF-8
/// * Any error of [`parse_attestation`] or [`CountPolicy::check`]
#[instrument(level = "debug", skip_all, fields(path = %path.display(), ?policy))]
pub fn load(path: &Path, policy: CountPolicy) -> Result<Attestation> {
    let data = fs::read(path).map_err(|source| KeyboxError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let attestation = parse_attestation(std::str::from_utf8(&data)?)?;
    policy.check(&attestation)?;
    Ok(attestation)
}

/// Validates the keybox file at `path` and summarizes its contents.
///
/// Failures are meant to be recoverable for callers: they mean the file is
/// not a usable keybox, nothing more.
///
/// # Errors
///
/// Same as [`load`].
pub fn validate(path: &Path, policy: CountPolicy) -> Result<ParseReport> {
    load(path, policy).map(|attestation| ParseReport::from(&attestation))
}

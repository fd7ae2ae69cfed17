//! Android attestation keybox files
//!
//! This crate parses the `AndroidAttestation` XML documents used to
//! provision hardware attestation keys, validates their structure and
//! summarizes what they contain.

pub mod certificate;
pub mod constants;
pub mod errors;
pub mod parser;
pub mod report;
pub mod types;
pub mod validate;

pub use errors::{KeyboxError, Result};
pub use parser::parse_attestation;
pub use report::{KeySummary, KeyboxSummary, ParseReport};
pub use types::{Attestation, Certificate, CertificateChain, Key, Keybox, PrivateKey};
pub use validate::{load, validate, CountPolicy};

//! Keybox and keystore extraction from Android devices
//!
//! A run connects to a device over ADB, obtains root access, then probes a
//! fixed list of on-device locations and copies whatever key material it
//! finds into a local output directory. Pulled keybox files are validated
//! with the [`keybox`] crate before they count as extracted.

pub mod cli;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod location;
pub mod manifest;
pub mod orchestrator;
pub mod root;
pub mod types;

pub use errors::{ExtractError, Result, RunError};
pub use extractor::Extractor;
pub use location::LocationKind;
pub use orchestrator::{default_locations, run};
pub use root::{obtain_root, RootMethod};
pub use types::{ExtractOptions, LocationOutcome, PulledArtifact, RunSummary};

//! Android Debug Bridge transport
//!
//! This crate wraps the `adb` command line tool. Every device interaction
//! is a subprocess invocation routed through a [`CommandRunner`], which
//! keeps the argument shapes in one place and lets callers substitute the
//! process layer in tests.

pub mod bridge;
pub mod constants;
pub mod errors;
pub mod runner;
#[cfg(test)]
mod tests;
pub mod utils;

pub use bridge::Adb;
pub use errors::{BridgeError, Result};
#[cfg(any(test, feature = "mock"))]
pub use runner::MockCommandRunner;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};

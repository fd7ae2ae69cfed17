use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use keybox::CountPolicy;

use crate::{
    constants::{
        ADB_PATH_ENV, ANDROID_SERIAL_ENV, DEFAULT_COMMAND_TIMEOUT, DEFAULT_OUTPUT_DIR,
        DEFAULT_SETTLE_DELAY,
    },
    orchestrator::default_locations,
    types::ExtractOptions,
};

#[derive(Debug, Parser)]
#[command(
    name = "keypull",
    about = "Extract keybox and keystore files from a rooted Android device",
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a keybox file already on disk
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Device locations to probe instead of the built-in list
    #[arg(value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Output directory for extracted files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Path to the adb executable
    #[arg(long, env = ADB_PATH_ENV, default_value = adb_bridge::constants::DEFAULT_ADB_PROGRAM)]
    pub adb: PathBuf,

    /// Serial of the device to use. Defaults to the first connected device
    #[arg(short, long, env = ANDROID_SERIAL_ENV)]
    pub device: Option<String>,

    /// Upper bound for each adb command in seconds, 0 disables it
    #[arg(long, default_value_t = DEFAULT_COMMAND_TIMEOUT.as_secs(), value_name = "SECONDS")]
    pub command_timeout_secs: u64,

    /// Wait after a successful `adb root` in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_millis() as u64, value_name = "MILLIS")]
    pub settle_delay_ms: u64,

    /// Reject keyboxes whose declared counts disagree with their contents
    #[arg(long)]
    pub strict_counts: bool,

    /// Write manifest.json with digests of every pulled file
    #[arg(long)]
    pub manifest: bool,
}

impl ExtractArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            output_dir: Some(self.output.clone()),
            device: self.device.clone(),
            settle_delay: Some(Duration::from_millis(self.settle_delay_ms)),
            count_policy: count_policy(self.strict_counts),
            write_manifest: self.manifest,
        }
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }

    /// Locations given on the command line, or the built-in list.
    pub fn locations(&self) -> Vec<String> {
        if self.locations.is_empty() {
            default_locations()
        } else {
            self.locations.clone()
        }
    }
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Keybox XML file to validate
    pub path: PathBuf,

    /// Reject keyboxes whose declared counts disagree with their contents
    #[arg(long)]
    pub strict_counts: bool,

    /// Also decode and print every certificate
    #[arg(long)]
    pub certificates: bool,
}

impl ValidateArgs {
    pub fn count_policy(&self) -> CountPolicy {
        count_policy(self.strict_counts)
    }
}

fn count_policy(strict: bool) -> CountPolicy {
    if strict {
        CountPolicy::Strict
    } else {
        CountPolicy::Lenient
    }
}

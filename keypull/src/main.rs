use std::{io::Write, process::ExitCode};

use adb_bridge::Adb;
use anyhow::{Context, Result};
use clap::Parser;
use keybox::{certificate::inspect_chain, ParseReport};
use keypull::cli::{Cli, Command, ExtractArgs, ValidateArgs};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match &cli.command {
        Some(Command::Validate(args)) => validate(args),
        None => extract(&cli.extract).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Run failed: {e:?}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// A run that extracted nothing still exits successfully; only failed
/// prerequisites are errors.
async fn extract(args: &ExtractArgs) -> Result<()> {
    let adb = Adb::with_program(&args.adb, args.command_timeout());
    let locations = args.locations();
    debug!("Probing {} locations with {}", locations.len(), args.adb.display());
    let mut stdout = std::io::stdout().lock();
    keypull::run(&adb, &locations, &args.options(), &mut stdout).await?;
    Ok(())
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let attestation = keybox::load(&args.path, args.count_policy())
        .with_context(|| format!("Keybox {} is invalid", args.path.display()))?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", ParseReport::from(&attestation))?;
    if args.certificates {
        for (keybox_index, keybox) in attestation.keyboxes.iter().enumerate() {
            for (key_index, key) in keybox.keys.iter().enumerate() {
                writeln!(stdout, "Keybox {} Key {} certificates:", keybox_index + 1, key_index + 1)?;
                for (position, info) in inspect_chain(&key.certificate_chain).into_iter().enumerate() {
                    match info {
                        Ok(info) => writeln!(stdout, "  [{}] {info}", position + 1)?,
                        Err(e) => writeln!(stdout, "  [{}] undecodable: {e}", position + 1)?,
                    }
                }
            }
        }
    }
    Ok(())
}

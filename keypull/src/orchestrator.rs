use std::io::Write;

use adb_bridge::{utils::select_device, Adb, CommandRunner};
use tracing::{info, instrument, warn};

use crate::{
    constants::{DEFAULT_SETTLE_DELAY, DEVICE_LOCATIONS},
    errors::{Result, RunError},
    extractor::Extractor,
    manifest::write_manifest,
    root::obtain_root,
    types::{ExtractOptions, RunSummary},
};

/// The built-in candidate locations as owned strings.
pub fn default_locations() -> Vec<String> {
    DEVICE_LOCATIONS.iter().map(|location| location.to_string()).collect()
}

/// Runs a full extraction against the attached device.
///
/// The device, root access and the output directory are prerequisites and
/// abort the run when missing. After that every location in `locations` is
/// attempted exactly once, in order; a failing location is reported on
/// `out` and the run moves on. A run where no location succeeded is still
/// `Ok`, with empty [`RunSummary::successes`].
///
/// # Errors
///
/// * `RunError::Connection` - If the bridge is unavailable or no (requested) device is connected
/// * `RunError::RootUnavailable` - If root access cannot be obtained
/// * `RunError::OutputDirectory` - If the output directory cannot be created
/// * `RunError::Output` - If writing to `out` fails outside of a location
#[instrument(level = "info", name = "extraction_run", skip_all)]
pub async fn run<R, W>(
    adb: &Adb<R>,
    locations: &[String],
    options: &ExtractOptions,
    out: &mut W,
) -> Result<RunSummary>
where
    R: CommandRunner,
    W: Write,
{
    writeln!(out, "Instantiating extraction process...")?;
    let output_dir = options
        .resolve_output_dir()
        .map_err(|source| RunError::OutputDirectory {
            path: options.requested_output_dir().to_path_buf(),
            source,
        })?;

    adb.start_server().await?;
    let connected = adb.list_devices().await?;
    let device = select_device(&connected, options.device.as_deref())?;
    writeln!(out, "Connected to device: {device}")?;

    let settle_delay = options.settle_delay.unwrap_or(DEFAULT_SETTLE_DELAY);
    let root_method = obtain_root(adb, &device, settle_delay, out).await?;

    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|source| RunError::OutputDirectory {
            path: output_dir.clone(),
            source,
        })?;
    info!("Writing extracted files to {}", output_dir.display());

    let extractor = Extractor::new(adb, device.as_str(), output_dir.as_path(), options.count_policy);
    let mut successes = Vec::new();
    let mut artifacts = Vec::new();
    for location in locations {
        writeln!(out, "Attempting extraction: {location}")?;
        match extractor.extract_from_location(location, out).await {
            Ok(outcome) => {
                artifacts.extend(outcome.artifacts);
                successes.push(location.clone());
                writeln!(out, "  Success: {location}")?;
            }
            Err(e) => {
                warn!("Extraction from {location} failed: {e}");
                writeln!(out, "  Failed: {e}")?;
            }
        }
    }

    let manifest_path = if options.write_manifest {
        match write_manifest(&output_dir, &device, root_method, &successes, &artifacts) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Failed to write manifest: {e}");
                writeln!(out, "Failed to write manifest: {e}")?;
                None
            }
        }
    } else {
        None
    };

    let summary = RunSummary {
        device,
        root_method,
        output_dir,
        attempted: locations.len(),
        successes,
        artifacts,
        manifest_path,
    };
    print_summary(&summary, out)?;
    Ok(summary)
}

/// Prints the closing lines of a run.
pub fn print_summary<W: Write>(summary: &RunSummary, out: &mut W) -> std::io::Result<()> {
    if summary.successes.is_empty() {
        return writeln!(out, "Keybox extraction failed.");
    }
    writeln!(
        out,
        "Extracted keybox data from {} location(s):",
        summary.successes.len()
    )?;
    for location in &summary.successes {
        writeln!(out, "  - {location}")?;
    }
    if let Some(manifest_path) = &summary.manifest_path {
        writeln!(out, "Manifest written to: {}", manifest_path.display())?;
    }
    writeln!(out, "\nExtraction saved to: {}", summary.output_dir.display())
}

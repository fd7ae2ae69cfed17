use crate::{
    constants::{DEVICE_LIST_HEADER, DEVICE_STATE},
    errors::{BridgeError, Result},
};

/// Extracts the serials of usable devices from `adb devices` output.
///
/// A line counts as connected iff its second whitespace separated field is
/// exactly `device`. The header line, blank lines and devices in any other
/// state (`unauthorized`, `offline`, ...) are skipped. Order is preserved.
///
/// # Example
///
/// ```
/// use adb_bridge::utils::parse_device_list;
///
/// let output = "List of devices attached\nABC123\tdevice\nXYZ789\tunauthorized\n";
/// assert_eq!(parse_device_list(output), vec!["ABC123".to_string()]);
/// ```
pub fn parse_device_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(DEVICE_LIST_HEADER))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(serial), Some(DEVICE_STATE)) => Some(serial.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Splits the output of a remote `find` into individual paths, dropping
/// blank entries and the carriage returns older devices emit.
pub fn parse_file_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Picks the device to operate on.
///
/// Without a request the first connected device wins.
///
/// # Errors
///
/// * `BridgeError::NoDeviceConnected` - If `connected` is empty
/// * `BridgeError::DeviceNotFound` - If `requested` is not among `connected`
pub fn select_device(connected: &[String], requested: Option<&str>) -> Result<String> {
    let first = connected.first().ok_or(BridgeError::NoDeviceConnected)?;
    match requested {
        None => Ok(first.clone()),
        Some(serial) if connected.iter().any(|device| device == serial) => {
            Ok(serial.to_string())
        }
        Some(serial) => Err(BridgeError::DeviceNotFound {
            device: serial.to_string(),
            connected: connected.to_vec(),
        }),
    }
}

/// Renders a command line for logs and error messages.
pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

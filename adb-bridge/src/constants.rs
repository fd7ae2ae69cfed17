/// Default name of the bridge executable, resolved through `PATH`.
pub const DEFAULT_ADB_PROGRAM: &str = "adb";

/// Subcommand starting the host side server.
pub const START_SERVER: &str = "start-server";

/// Subcommand listing attached devices.
pub const DEVICES: &str = "devices";

/// Flag scoping a command to a single device serial.
pub const SERIAL_FLAG: &str = "-s";

/// Subcommand copying a remote path to the host.
pub const PULL: &str = "pull";

/// Subcommand running a command on the device.
pub const SHELL: &str = "shell";

/// Subcommand restarting the device daemon with root privileges.
pub const ROOT: &str = "root";

/// Remote tool used to enumerate files below a directory.
pub const FIND: &str = "find";

/// Connection state reported by `adb devices` for a usable device.
///
/// Other states (`unauthorized`, `offline`, `recovery`, ...) are not usable
/// for pulling files and are filtered out.
pub const DEVICE_STATE: &str = "device";

/// Header line printed by `adb devices` before the device table.
pub const DEVICE_LIST_HEADER: &str = "List of devices attached";

/// Message printed by `adb root` on production builds. The command still
/// exits with status zero in that case.
pub const ROOT_REFUSED_MARKER: &str = "cannot run as root";

use std::time::Duration;

/// Device paths probed for key material, in probing order.
///
/// Paths ending in `.xml` are keybox files, paths ending in `.sqlite` are
/// keystore databases and everything else is walked as a directory.
pub const DEVICE_LOCATIONS: &[&str] = &[
    "/data/misc/keystore/",
    "/data/misc/keystore/user_0/",
    "/data/misc/keystore/persistent.sqlite",
    "/data/adb/tricky_store/keybox.xml",
    "/mnt/vendor/keystore/",
    "/system/etc/security/keystore/",
    "/vendor/etc/keystore/",
];

/// Output directory, relative to the working directory at startup.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Local name of a pulled keybox file location.
pub const KEYBOX_FILE_NAME: &str = "keybox.xml";

/// Local name of a pulled keystore database location.
pub const KEYSTORE_FILE_NAME: &str = "persistent.sqlite";

/// Name of the optional extraction manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

pub const XML_SUFFIX: &str = ".xml";
pub const SQLITE_SUFFIX: &str = ".sqlite";

/// Remote files whose path contains this marker are validated as keyboxes
/// when found inside a directory location.
pub const KEYBOX_MARKER: &str = "keybox";

/// Time the device daemon needs to come back after `adb root`.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Upper bound for a single bridge command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Remote command confirming root access through the `su` binary.
pub const SU_PROBE: &[&str] = &["su", "-c", "id"];

/// Environment variable overriding the bridge executable.
pub const ADB_PATH_ENV: &str = "KEYPULL_ADB";

/// Environment variable selecting a device, shared with `adb` itself.
pub const ANDROID_SERIAL_ENV: &str = "ANDROID_SERIAL";

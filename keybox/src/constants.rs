/// Document element of a keybox file.
pub const ROOT_ELEMENT: &str = "AndroidAttestation";

pub const NUMBER_OF_KEYBOXES: &str = "NumberOfKeyboxes";
pub const KEYBOX: &str = "Keybox";
pub const KEY: &str = "Key";
pub const PRIVATE_KEY: &str = "PrivateKey";
pub const CERTIFICATE_CHAIN: &str = "CertificateChain";
pub const NUMBER_OF_CERTIFICATES: &str = "NumberOfCertificates";
pub const CERTIFICATE: &str = "Certificate";

pub const DEVICE_ID_ATTRIBUTE: &str = "DeviceID";
pub const ALGORITHM_ATTRIBUTE: &str = "algorithm";
pub const FORMAT_ATTRIBUTE: &str = "format";

/// Label printed for keys without an `algorithm` attribute.
pub const UNKNOWN_ALGORITHM: &str = "unknown";

/// PEM armor lines start with this marker.
pub const PEM_BOUNDARY: &str = "-----";

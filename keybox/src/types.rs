/// Parsed `AndroidAttestation` document.
///
/// Declared counts are kept as written in the file. They are not required
/// to match the number of entries that follow them, see
/// [`CountPolicy`](crate::CountPolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attestation {
    /// Value of `<NumberOfKeyboxes>`, zero when absent
    pub number_of_keyboxes: i64,
    /// `<Keybox>` entries in document order
    pub keyboxes: Vec<Keybox>,
}

/// Keys provisioned for a single device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keybox {
    /// `DeviceID` attribute
    pub device_id: String,
    /// `<Key>` entries in document order
    pub keys: Vec<Key>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Key {
    /// `algorithm` attribute, typically `ecdsa` or `rsa`
    pub algorithm: String,
    pub private_key: PrivateKey,
    pub certificate_chain: CertificateChain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateKey {
    /// `format` attribute, typically `pem`
    pub format: String,
    /// Encoded key material with surrounding whitespace removed
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateChain {
    /// Value of `<NumberOfCertificates>`, zero when absent
    pub number_of_certificates: i64,
    /// `<Certificate>` entries, leaf first
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    /// `format` attribute, typically `pem`
    pub format: String,
    /// Encoded certificate with surrounding whitespace removed
    pub data: String,
}

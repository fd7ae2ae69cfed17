use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyboxError>;

#[derive(Debug, Error)]
pub enum KeyboxError {
    #[error("Failed to open keybox file {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Keybox file is not valid UTF-8")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error("XML is invalid: {0}")]
    MalformedXml(#[from] roxmltree::Error),
    #[error("Unexpected document element <{found}>, expected <AndroidAttestation>")]
    UnexpectedRoot { found: String },
    #[error("Invalid {element} value: {value:?}")]
    InvalidCount { element: &'static str, value: String },
    #[error("{element} declares {declared} entries but {actual} are present")]
    CountMismatch {
        element: &'static str,
        declared: i64,
        actual: usize,
    },
    #[error("Failed to decode certificate")]
    CertificateDecodeError(#[from] base64::DecodeError),
    #[error("Failed to parse certificate: {0}")]
    CertificateParseError(String),
}

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::{
    constants::PEM_BOUNDARY,
    errors::{KeyboxError, Result},
    types::{Certificate, CertificateChain},
};

/// Identity fields of one certificate in an attestation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    /// Serial number as lowercase hex
    pub serial: String,
    /// End of the validity period
    pub not_after: String,
}

impl fmt::Display for CertificateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subject={}, issuer={}, serial={}, not_after={}",
            self.subject, self.issuer, self.serial, self.not_after
        )
    }
}

/// Decodes every certificate of `chain`, in chain order.
///
/// Each entry fails on its own so one damaged certificate does not hide
/// the rest of the chain.
pub fn inspect_chain(chain: &CertificateChain) -> Vec<Result<CertificateInfo>> {
    chain.certificates.iter().map(inspect_certificate).collect()
}

/// Decodes a PEM encoded certificate and extracts its identity fields.
///
/// # Errors
///
/// * `KeyboxError::CertificateDecodeError` - If the PEM body is not valid base64
/// * `KeyboxError::CertificateParseError` - If the decoded bytes are not a DER certificate
#[tracing::instrument(level = "debug", skip_all, fields(format = %certificate.format))]
pub fn inspect_certificate(certificate: &Certificate) -> Result<CertificateInfo> {
    let der = decode_pem_body(&certificate.data)?;
    let (_, parsed) = X509Certificate::from_der(&der)
        .map_err(|e| KeyboxError::CertificateParseError(e.to_string()))?;
    Ok(CertificateInfo {
        subject: parsed.subject().to_string(),
        issuer: parsed.issuer().to_string(),
        serial: hex::encode(parsed.raw_serial()),
        not_after: parsed.validity().not_after.to_string(),
    })
}

/// Strips the armor lines and indentation of a PEM block and decodes the
/// base64 body.
fn decode_pem_body(pem: &str) -> Result<Vec<u8>> {
    let body = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(PEM_BOUNDARY))
        .collect::<String>();
    Ok(STANDARD.decode(body)?)
}

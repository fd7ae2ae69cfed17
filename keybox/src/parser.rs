use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, instrument};

use crate::{
    constants::{
        ALGORITHM_ATTRIBUTE, CERTIFICATE, CERTIFICATE_CHAIN, DEVICE_ID_ATTRIBUTE,
        FORMAT_ATTRIBUTE, KEY, KEYBOX, NUMBER_OF_CERTIFICATES, NUMBER_OF_KEYBOXES, PRIVATE_KEY,
        ROOT_ELEMENT,
    },
    errors::{KeyboxError, Result},
    types::{Attestation, Certificate, CertificateChain, Key, Keybox, PrivateKey},
};

/// Parses the text of a keybox file.
///
/// Elements are bound by name among the direct children of their parent,
/// unknown elements and attributes are ignored. Missing attributes, elements
/// and count elements read as empty, default and zero respectively. A
/// `<!DOCTYPE>` declaration is accepted.
///
/// # Errors
///
/// * `KeyboxError::MalformedXml` - If the text is not well-formed XML
/// * `KeyboxError::UnexpectedRoot` - If the document element is not `AndroidAttestation`
/// * `KeyboxError::InvalidCount` - If a count element does not hold an integer
#[instrument(level = "debug", skip_all)]
pub fn parse_attestation(xml: &str) -> Result<Attestation> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options)?;
    let root = document.root_element();
    if !root.has_tag_name(ROOT_ELEMENT) {
        return Err(KeyboxError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
        });
    }
    let attestation = Attestation {
        number_of_keyboxes: parse_count(root, NUMBER_OF_KEYBOXES)?,
        keyboxes: children(root, KEYBOX)
            .map(parse_keybox)
            .collect::<Result<_>>()?,
    };
    debug!(
        "Parsed {} keybox entries, {} declared",
        attestation.keyboxes.len(),
        attestation.number_of_keyboxes
    );
    Ok(attestation)
}

fn parse_keybox(node: Node) -> Result<Keybox> {
    Ok(Keybox {
        device_id: attribute(node, DEVICE_ID_ATTRIBUTE),
        keys: children(node, KEY).map(parse_key).collect::<Result<_>>()?,
    })
}

fn parse_key(node: Node) -> Result<Key> {
    let private_key = children(node, PRIVATE_KEY)
        .next()
        .map(|private_key| PrivateKey {
            format: attribute(private_key, FORMAT_ATTRIBUTE),
            data: text(private_key),
        })
        .unwrap_or_default();
    let certificate_chain = children(node, CERTIFICATE_CHAIN)
        .next()
        .map(parse_certificate_chain)
        .transpose()?
        .unwrap_or_default();
    Ok(Key {
        algorithm: attribute(node, ALGORITHM_ATTRIBUTE),
        private_key,
        certificate_chain,
    })
}

fn parse_certificate_chain(node: Node) -> Result<CertificateChain> {
    Ok(CertificateChain {
        number_of_certificates: parse_count(node, NUMBER_OF_CERTIFICATES)?,
        certificates: children(node, CERTIFICATE)
            .map(|certificate| Certificate {
                format: attribute(certificate, FORMAT_ATTRIBUTE),
                data: text(certificate),
            })
            .collect(),
    })
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(name))
}

/// Reads a count element. An absent or empty element counts as zero, a
/// negative one is kept as declared.
fn parse_count(node: Node, element: &'static str) -> Result<i64> {
    let Some(count) = children(node, element).next() else {
        return Ok(0);
    };
    let value = text(count);
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| KeyboxError::InvalidCount { element, value })
}

fn attribute(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// Character data directly inside `node`, trimmed.
fn text(node: Node) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

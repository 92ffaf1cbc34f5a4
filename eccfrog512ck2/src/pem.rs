//! PEM framing for key material
//!
//! Two block types, distinguished by label:
//!
//! - `ECCFROG512CK2 PRIVATE KEY` wraps a SEC1 scalar with version byte;
//! - `ECCFROG512CK2 PUBLIC KEY` wraps a SEC1 uncompressed point.
//!
//! Standard armor: base64 body wrapped at 64 characters. The decoder takes
//! the first block in the input, requires its label to match, then defers to
//! the SEC1 codec. Encrypted PEM and extra headers are unsupported.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::sec1;

/// Label of a private-key block.
pub const PRIVATE_KEY_LABEL: &str = "ECCFROG512CK2 PRIVATE KEY";

/// Label of a public-key block.
pub const PUBLIC_KEY_LABEL: &str = "ECCFROG512CK2 PUBLIC KEY";

const LINE_WIDTH: usize = 64;

/// Encode a private key as a PEM block (SEC1 scalar with version byte).
pub fn encode_private_key(key: &PrivateKey) -> String {
    let payload = sec1::encode_scalar(key, true);
    armor(PRIVATE_KEY_LABEL, payload.as_slice())
}

/// Parse a PEM private-key block.
pub fn decode_private_key(pem: &[u8]) -> Result<PrivateKey> {
    let payload = unarmor(pem, PRIVATE_KEY_LABEL)?;
    sec1::decode_scalar(&payload)
}

/// Encode a public key as a PEM block (SEC1 uncompressed point).
pub fn encode_public_key(key: &PublicKey) -> String {
    let payload = sec1::encode_point_uncompressed(key.as_point());
    armor(PUBLIC_KEY_LABEL, &payload)
}

/// Parse a PEM public-key block.
pub fn decode_public_key(pem: &[u8]) -> Result<PublicKey> {
    let payload = unarmor(pem, PUBLIC_KEY_LABEL)?;
    sec1::decode_point(&payload)
}

fn armor(label: &str, payload: &[u8]) -> String {
    let body = BASE64.encode(payload);
    let mut out = String::with_capacity(body.len() + 2 * label.len() + 40);
    out.push_str("-----BEGIN ");
    out.push_str(label);
    out.push_str("-----\n");
    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII, so the chunk boundary is always valid
        out.push_str(std::str::from_utf8(chunk).expect("base64 body is ASCII"));
        out.push('\n');
    }
    out.push_str("-----END ");
    out.push_str(label);
    out.push_str("-----\n");
    out
}

/// Extract the first PEM block from `input` and return its decoded payload.
/// The block's label must equal `expected_label`.
fn unarmor(input: &[u8], expected_label: &str) -> Result<Vec<u8>> {
    const CONTEXT: &str = "PEM block";

    let text = std::str::from_utf8(input)
        .map_err(|_| Error::encoding(CONTEXT, "input is not valid UTF-8"))?;

    let begin = text
        .find("-----BEGIN ")
        .ok_or_else(|| Error::encoding(CONTEXT, "no BEGIN marker"))?;
    let after_begin = &text[begin + "-----BEGIN ".len()..];
    let label_end = after_begin
        .find("-----")
        .ok_or_else(|| Error::encoding(CONTEXT, "unterminated BEGIN marker"))?;
    let label = &after_begin[..label_end];

    if label != expected_label {
        return Err(Error::encoding(CONTEXT, "unexpected block label"));
    }

    let body_start = label_end + "-----".len();
    let body = &after_begin[body_start..];
    let end_marker = format!("-----END {}-----", label);
    let end = body
        .find(&end_marker)
        .ok_or_else(|| Error::encoding(CONTEXT, "no matching END marker"))?;

    let base64_body: String = body[..end].split_whitespace().collect();
    if base64_body.is_empty() {
        return Err(Error::encoding(CONTEXT, "block body is empty"));
    }

    BASE64
        .decode(base64_body.as_bytes())
        .map_err(|_| Error::encoding(CONTEXT, "body is not valid base64"))
}

//! Prefixed hex HMAC-SHA256 webhook signatures.
//!
//! Used by providers that send `sha256=<hex>` over the raw request body
//! (Squarespace-style). The secret may carry a `whsec_` marker, which is
//! not part of the key material.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix some dashboards prepend to signing secrets.
const SECRET_PREFIX: &str = "whsec_";

/// Prefix carried by the signature header value.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies `signature_header` against an HMAC-SHA256 of `raw_body`.
///
/// Returns false for an empty secret, a missing or empty header, malformed
/// hex, or a digest of the wrong length. Never panics.
pub fn verify(raw_body: &[u8], signature_header: Option<&str>, secret: &str) -> bool {
    let secret = normalize_secret(secret);
    if secret.is_empty() {
        return false;
    }

    let provided = match signature_header.map(str::trim) {
        Some(header) if !header.is_empty() => header,
        _ => return false,
    };

    let provided = match hex::decode(strip_signature_prefix(provided)) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let expected = compute_digest(raw_body, secret);
    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(&provided).into()
}

/// Produces the header value a sender would attach: `sha256=<hex>`.
pub fn sign(raw_body: &[u8], secret: &str) -> String {
    let digest = compute_digest(raw_body, normalize_secret(secret));
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
}

fn normalize_secret(secret: &str) -> &str {
    let secret = secret.trim();
    secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret)
}

fn strip_signature_prefix(header: &str) -> &str {
    header.strip_prefix(SIGNATURE_PREFIX).unwrap_or(header)
}

fn compute_digest(raw_body: &[u8], secret: &str) -> Vec<u8> {
    // HMAC accepts keys of any length, including empty.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(raw_body);
    mac.finalize().into_bytes().to_vec()
}

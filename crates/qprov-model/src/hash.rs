//! Deterministic content digests.
//!
//! All content hashes in qprov are SHA-256 over a canonical JSON encoding,
//! truncated to 16 hex characters. `serde_json` maps are backed by a
//! `BTreeMap`, so object keys always serialize in sorted order and the
//! encoding is canonical without any extra normalization pass.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the full SHA-256 digest.
const DIGEST_LEN: usize = 16;

/// Compute the truncated SHA-256 digest of a canonical JSON value.
pub fn digest(value: &Value) -> String {
    let serialized = value.to_string();
    digest_bytes(serialized.as_bytes())
}

/// Compute the truncated SHA-256 digest of raw bytes.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let full = hasher.finalize();
    full.iter()
        .take(DIGEST_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect()
}

//! Stable content identities for cached arrays.

use sha2::{Digest, Sha256};

use crate::{Array, Kind};

/// Returns the SHA-256 identity of `data` within `kind`, as lowercase hex.
///
/// The digest covers the kind tag, the payload type and the raw little-endian
/// values, so equal data under different kinds gets different identities.
pub fn content_hash(kind: Kind, data: &Array) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(data.type_name().as_bytes());
    hasher.update([0u8]);
    match data {
        Array::Float(v) => {
            for x in v {
                hasher.update(x.to_le_bytes());
            }
        }
        Array::Labels(v) => {
            for x in v {
                hasher.update(x.to_le_bytes());
            }
        }
        Array::Mask(v) => {
            for &x in v {
                hasher.update([x as u8]);
            }
        }
        Array::Indices(v) => {
            for &x in v {
                hasher.update((x as u64).to_le_bytes());
            }
        }
        Array::Matrix(m) => {
            hasher.update((m.rows() as u64).to_le_bytes());
            hasher.update((m.cols() as u64).to_le_bytes());
            for x in m.values() {
                hasher.update(x.to_le_bytes());
            }
        }
    }
    hex::encode(hasher.finalize())
}

/// Derives one identity from several parts, e.g. a merged-data identity
/// plus a subset identity. Order matters.
pub fn combine_keys(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

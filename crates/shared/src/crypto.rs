//! Content hashing for photo storage.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of raw bytes as a hex string.
///
/// Captured check-in photos are stored content-addressed: the digest
/// becomes the object key, so re-submitting the same frame never writes
/// a second copy.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

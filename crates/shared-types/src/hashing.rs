//! # SHA-256 Hashing
//!
//! One-shot and multi-input hashing helpers used by every subsystem that
//! binds content to a digest (ledger entries, transition proofs, Merkle
//! nodes, PDO records).

use sha2::{Digest, Sha256};

/// SHA-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// The all-zero hash, used as a sentinel for "no predecessor".
pub const ZERO_HASH: Hash = [0u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two nodes together (left || right).
pub fn sha256_concat(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Hash multiple inputs as one message.
///
/// Each part is length-prefixed so that `["ab", "c"]` and `["a", "bc"]`
/// never collide.
pub fn sha256_parts(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Render a hash as lowercase hex for logs and audit output.
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut out = String::with_capacity(64);
    for byte in hash {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

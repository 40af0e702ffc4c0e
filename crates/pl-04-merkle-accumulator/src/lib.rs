//! # PL-04 Merkle Accumulator
//!
//! Binary Merkle tree over an ordered list of leaf hashes (typically
//! ledger entry hashes or PDO hashes), producing:
//!
//! - **Inclusion proofs** — a sibling path a verifier can fold to the root
//!   without holding the tree
//! - **Checkpoint proofs** — periodic (root, size) attestations of the
//!   whole log
//!
//! ## Odd-leaf padding
//!
//! Levels with an odd node count are padded by duplicating the last node.
//! This slightly biases proof path lengths at certain indices, but it is
//! the established policy for this data: changing it would alter the root
//! of every existing tree, so it is kept as documented behavior.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod proof;
pub mod tree;

pub use errors::MerkleError;
pub use proof::{CheckpointProof, InclusionProof, Position, ProofNode};
pub use tree::MerkleTree;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Merkle Errors

use thiserror::Error;

/// Merkle tree operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// No proof or root can be produced for an empty tree.
    #[error("tree has no leaves")]
    EmptyTree,

    /// Requested leaf index does not exist.
    #[error("leaf index {index} out of bounds for tree of {size} leaves")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        size: usize,
    },
}

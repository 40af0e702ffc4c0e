//! # Merkle Tree
//!
//! Tree construction and proof generation. The root is rebuilt bottom-up
//! from the leaf hashes on demand; odd levels are padded by duplicating
//! the last node.

use shared_types::{sha256_concat, Hash, ZERO_HASH};

use crate::errors::MerkleError;
use crate::proof::{InclusionProof, Position, ProofNode};

/// Binary Merkle tree over an ordered list of leaf hashes.
#[derive(Clone, Debug, Default)]
pub struct MerkleTree {
    leaves: Vec<Hash>,
}

impl MerkleTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree over existing leaves (e.g. a ledger's entry hashes).
    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        Self { leaves }
    }

    /// Append a leaf hash; returns its index.
    pub fn add_leaf(&mut self, hash: Hash) -> usize {
        self.leaves.push(hash);
        self.leaves.len() - 1
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Is the tree empty?
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The leaf hash at an index.
    pub fn leaf(&self, index: usize) -> Option<&Hash> {
        self.leaves.get(index)
    }

    /// Compute the root bottom-up from the leaf hashes.
    ///
    /// Odd node counts at any level are padded by duplicating the final
    /// node. Deterministic: the same leaves always yield the same root.
    /// An empty tree has the all-zero root.
    pub fn compute_root(&self) -> Hash {
        if self.leaves.is_empty() {
            return ZERO_HASH;
        }
        if self.leaves.len() == 1 {
            return self.leaves[0];
        }

        let mut level = self.leaves.clone();
        while level.len() > 1 {
            let mut next_level = Vec::with_capacity(level.len().div_ceil(2));
            for chunk in level.chunks(2) {
                let left = &chunk[0];
                let right = chunk.get(1).unwrap_or(left); // Duplicate last if odd
                next_level.push(sha256_concat(left, right));
            }
            level = next_level;
        }
        level[0]
    }

    /// Build the inclusion proof for one leaf.
    ///
    /// Walks the tree bottom-up collecting the sibling hash and its
    /// position at each level. The returned proof is self-contained:
    /// verification needs no access to this tree.
    pub fn get_proof(&self, leaf_index: usize) -> Result<InclusionProof, MerkleError> {
        if self.leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }
        if leaf_index >= self.leaves.len() {
            return Err(MerkleError::IndexOutOfBounds {
                index: leaf_index,
                size: self.leaves.len(),
            });
        }

        let mut siblings = Vec::new();
        let mut level = self.leaves.clone();
        let mut index = leaf_index;

        while level.len() > 1 {
            let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };

            if sibling_index < level.len() {
                let position = if index % 2 == 0 {
                    Position::Right // Sibling is on the right
                } else {
                    Position::Left // Sibling is on the left
                };
                siblings.push(ProofNode {
                    hash: level[sibling_index],
                    position,
                });
            } else {
                // Last node of an odd level pairs with its own duplicate.
                siblings.push(ProofNode {
                    hash: level[index],
                    position: Position::Right,
                });
            }

            let mut next_level = Vec::with_capacity(level.len().div_ceil(2));
            for chunk in level.chunks(2) {
                let left = &chunk[0];
                let right = chunk.get(1).unwrap_or(left);
                next_level.push(sha256_concat(left, right));
            }
            level = next_level;
            index /= 2;
        }

        Ok(InclusionProof {
            leaf_hash: self.leaves[leaf_index],
            leaf_index,
            siblings,
            root_hash: level[0],
            tree_size: self.leaves.len(),
        })
    }
}

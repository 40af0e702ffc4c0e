//! # Inclusion and Checkpoint Proofs
//!
//! Self-contained proof objects: verification needs nothing beyond the
//! proof and the claimed data.

use serde::{Deserialize, Serialize};
use shared_types::{sha256, sha256_concat, Hash, Timestamp};

use crate::tree::MerkleTree;

/// Which side a sibling hash sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    /// Sibling is the left input of the parent hash.
    Left,
    /// Sibling is the right input of the parent hash.
    Right,
}

/// One step of an inclusion proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// The sibling hash at this level.
    pub hash: Hash,
    /// Which side the sibling is on.
    pub position: Position,
}

impl ProofNode {
    /// A sibling on the left.
    pub fn left(hash: Hash) -> Self {
        Self {
            hash,
            position: Position::Left,
        }
    }

    /// A sibling on the right.
    pub fn right(hash: Hash) -> Self {
        Self {
            hash,
            position: Position::Right,
        }
    }
}

/// Proof that one leaf is included in a tree with a given root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// The leaf hash the proof is about.
    pub leaf_hash: Hash,
    /// The leaf's index in the tree.
    pub leaf_index: usize,
    /// Sibling path from leaf level to just below the root.
    pub siblings: Vec<ProofNode>,
    /// The root the path folds to.
    pub root_hash: Hash,
    /// Leaf count of the tree the proof was taken from.
    pub tree_size: usize,
}

impl InclusionProof {
    /// Verify the proof against a claimed leaf hash.
    ///
    /// Folds the sibling path in the recorded directions and compares the
    /// result to the recorded root. Needs no tree access.
    pub fn verify_leaf_hash(&self, leaf_hash: &Hash) -> bool {
        if *leaf_hash != self.leaf_hash {
            return false;
        }
        let mut current = *leaf_hash;
        for node in &self.siblings {
            current = match node.position {
                Position::Left => sha256_concat(&node.hash, &current),
                Position::Right => sha256_concat(&current, &node.hash),
            };
        }
        current == self.root_hash
    }

    /// Verify the proof against the claimed raw leaf data.
    ///
    /// The leaf hash is recomputed as SHA-256 of the data, so a proof can
    /// never be made to vouch for content it was not built over.
    pub fn verify(&self, leaf_data: &[u8]) -> bool {
        self.verify_leaf_hash(&sha256(leaf_data))
    }
}

/// Periodic attestation that a ledger of `entry_count` entries had a given
/// Merkle root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointProof {
    /// The attested root.
    pub root_hash: Hash,
    /// The attested leaf count.
    pub entry_count: usize,
    /// When the checkpoint was taken (ms since epoch).
    pub checkpointed_at: Timestamp,
}

impl CheckpointProof {
    /// Capture a checkpoint of a tree's current root and size.
    pub fn capture(tree: &MerkleTree, checkpointed_at: Timestamp) -> Self {
        Self {
            root_hash: tree.compute_root(),
            entry_count: tree.len(),
            checkpointed_at,
        }
    }

    /// Does a claimed (root, count) pair match the live tree?
    pub fn verify_checkpoint(claimed_root: &Hash, entry_count: usize, tree: &MerkleTree) -> bool {
        tree.compute_root() == *claimed_root && tree.len() == entry_count
    }

    /// Does this stored checkpoint still match the live tree?
    pub fn matches(&self, tree: &MerkleTree) -> bool {
        Self::verify_checkpoint(&self.root_hash, self.entry_count, tree)
    }
}

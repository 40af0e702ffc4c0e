//! Merkle accumulator: every leaf of every tree shape proves inclusion,
//! and a proof never vouches for data it was not built over.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::sha256;

    use pl_04_merkle_accumulator::{CheckpointProof, MerkleTree};

    fn tree_over(entries: &[Vec<u8>]) -> MerkleTree {
        MerkleTree::from_leaves(entries.iter().map(|e| sha256(e)).collect())
    }

    proptest! {
        // Inclusion proofs for every leaf index fold to the tree root,
        // odd and even widths alike.
        #[test]
        fn prop_every_leaf_proves_inclusion(
            entries in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 1..32),
                1..24,
            ),
        ) {
            let tree = tree_over(&entries);
            let root = tree.compute_root();

            for (index, entry) in entries.iter().enumerate() {
                let proof = tree.get_proof(index).unwrap();
                prop_assert_eq!(proof.root_hash, root);
                prop_assert!(proof.verify(entry));
            }
        }

        // A proof for one leaf rejects any other leaf's data.
        #[test]
        fn prop_proof_rejects_foreign_data(
            entries in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 1..32),
                2..24,
            ),
            pick in 0usize..24,
        ) {
            let tree = tree_over(&entries);
            let index = pick % entries.len();
            let other = (index + 1) % entries.len();
            prop_assume!(entries[index] != entries[other]);

            let proof = tree.get_proof(index).unwrap();
            prop_assert!(!proof.verify(&entries[other]));
        }

        // Appending a leaf changes the root, and the old checkpoint
        // no longer matches.
        #[test]
        fn prop_checkpoint_detects_growth(
            entries in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 1..32),
                1..24,
            ),
            extra in proptest::collection::vec(any::<u8>(), 1..32),
        ) {
            let mut tree = tree_over(&entries);
            let checkpoint = CheckpointProof::capture(&tree, 1_000);
            prop_assert!(checkpoint.matches(&tree));

            tree.add_leaf(sha256(&extra));
            prop_assert!(!checkpoint.matches(&tree));
        }
    }
}

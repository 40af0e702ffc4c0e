//! Per-artifact proof chains: every honestly emitted chain verifies, and
//! tampering with any field of any link is detected.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::ArtifactId;

    use pl_01_state_machine::{ArtifactState, ShipmentState, StateTransition};
    use pl_02_state_validation::{
        verify_chain, StateTransitionProof, TransitionError, TransitionProofEmitter,
    };

    /// Emit a chain of `n` proofs for one artifact, alternating between
    /// two declared shipment transitions.
    fn emit_chain(n: usize) -> Vec<StateTransitionProof> {
        let emitter = TransitionProofEmitter;
        let artifact_id = ArtifactId::new("SHIP-P");
        let mut previous = None;
        let mut chain = Vec::with_capacity(n);
        for i in 0..n {
            let (from, to) = if i % 2 == 0 {
                (
                    ArtifactState::Shipment(ShipmentState::Created),
                    ArtifactState::Shipment(ShipmentState::InTransit),
                )
            } else {
                (
                    ArtifactState::Shipment(ShipmentState::InTransit),
                    ArtifactState::Shipment(ShipmentState::Delivered),
                )
            };
            let transition = StateTransition::new(
                artifact_id.clone(),
                from,
                to,
                1_000 + i as u64 * 100,
                "ops-gateway",
            );
            let proof = emitter.emit(&transition, previous);
            previous = Some(proof.proof_hash);
            chain.push(proof);
        }
        chain
    }

    proptest! {
        // An honestly emitted chain of any length verifies.
        #[test]
        fn prop_emitted_chain_verifies(n in 1usize..30) {
            let chain = emit_chain(n);
            prop_assert!(verify_chain(&chain).is_ok());
        }

        // Tampering with the timestamp of any link is caught at that link.
        #[test]
        fn prop_tampered_link_detected(n in 1usize..20, victim in 0usize..20) {
            let mut chain = emit_chain(n);
            let victim = victim % n;
            chain[victim].timestamp += 1;

            match verify_chain(&chain) {
                Err(TransitionError::HashMismatch { index }) => {
                    prop_assert_eq!(index, victim);
                }
                other => prop_assert!(false, "expected hash mismatch, got {:?}", other),
            }
        }

        // Splicing a link out of the middle breaks the chain at the splice.
        #[test]
        fn prop_spliced_chain_detected(n in 3usize..20, victim in 1usize..19) {
            let mut chain = emit_chain(n);
            let victim = 1 + victim % (n - 2).max(1);
            chain.remove(victim);

            match verify_chain(&chain) {
                Err(TransitionError::ChainBroken { index }) => {
                    prop_assert_eq!(index, victim);
                }
                other => prop_assert!(false, "expected broken chain, got {:?}", other),
            }
        }
    }
}

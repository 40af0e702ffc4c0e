//! # Lifecycle Scenario Tests
//!
//! Cross-subsystem scenarios that exercise the documented operational
//! flows end to end:
//!
//! 1. **Ordered appends**: three in-order ledger appends verify as a
//!    contiguous chain; a late out-of-order append is rejected with the
//!    cursor untouched.
//! 2. **Odd-width accumulator**: a five-leaf Merkle tree computes a
//!    stable root and proves inclusion of the unpaired last leaf.
//! 3. **Divergent histories**: two event logs for the same shipment that
//!    end in different states replay to different states and hashes.
//! 4. **Finalized artifacts**: no transition leaves a terminal state, and
//!    a finalized artifact rejects every transition outright.

#[cfg(test)]
mod tests {
    use shared_types::{ArtifactId, EntryId, EventId, Payload};

    use pl_01_state_machine::{
        ArtifactState, ArtifactType, EventStateRecord, ShipmentState, StateMachine,
        StateTransition,
    };
    use pl_02_state_validation::{
        Severity, StateValidator, ValidatorConfig, ViolationType,
    };
    use pl_03_ledger_sequencer::{LedgerSequencer, SequencerError};
    use pl_04_merkle_accumulator::MerkleTree;
    use pl_05_replay_engine::StateReplayEngine;

    use serde_json::json;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn make_payload(artifact: &str, state: &str) -> Payload {
        let mut payload = Payload::new();
        payload.insert("artifact_id".into(), json!(artifact));
        payload.insert("to_state".into(), json!(state));
        payload
    }

    fn shipment_event(
        event_id: &str,
        event_type: &str,
        sequence: u64,
        timestamp: u64,
    ) -> EventStateRecord {
        EventStateRecord::new(
            ArtifactType::Shipment,
            EventId::new(event_id),
            event_type,
            sequence,
            timestamp,
        )
    }

    fn validator() -> StateValidator {
        let machine = StateMachine::new().unwrap();
        StateValidator::with_config(machine, ValidatorConfig::for_testing())
    }

    // =========================================================================
    // SCENARIO: ORDERED APPENDS AND A LATE ARRIVAL
    // =========================================================================

    #[test]
    fn test_three_ordered_appends_verify_as_contiguous_chain() {
        let sequencer = LedgerSequencer::new(1_000);

        sequencer
            .append(EntryId::new("E-1"), make_payload("SHIP-7", "CREATED"), 1_100)
            .unwrap();
        sequencer
            .append(EntryId::new("E-2"), make_payload("SHIP-7", "IN_TRANSIT"), 1_200)
            .unwrap();
        let third = sequencer
            .append(EntryId::new("E-3"), make_payload("SHIP-7", "DELIVERED"), 1_300)
            .unwrap();

        assert_eq!(third.sequence, 3);
        assert!(sequencer.verify_sequence(0, 2).is_ok());
    }

    #[test]
    fn test_late_append_rejected_and_cursor_untouched() {
        let sequencer = LedgerSequencer::new(1_000);
        sequencer
            .append(EntryId::new("E-1"), make_payload("SHIP-7", "CREATED"), 1_100)
            .unwrap();
        sequencer
            .append(EntryId::new("E-2"), make_payload("SHIP-7", "IN_TRANSIT"), 1_200)
            .unwrap();
        sequencer
            .append(EntryId::new("E-3"), make_payload("SHIP-7", "DELIVERED"), 1_300)
            .unwrap();

        let cursor_before = sequencer.cursor();
        let err = sequencer
            .append(EntryId::new("E-4"), make_payload("SHIP-7", "EXCEPTION"), 1_250)
            .unwrap_err();

        assert!(matches!(
            err,
            SequencerError::TimestampRegression {
                current: 1_300,
                attempted: 1_250,
            }
        ));
        assert_eq!(sequencer.cursor(), cursor_before);
        assert_eq!(sequencer.len(), 3);
        assert!(sequencer.verify_sequence(0, 2).is_ok());
    }

    // =========================================================================
    // SCENARIO: ODD-WIDTH ACCUMULATOR
    // =========================================================================

    #[test]
    fn test_five_leaf_root_is_stable_and_last_leaf_proves() {
        let sequencer = LedgerSequencer::new(0);
        for i in 0..5u64 {
            sequencer
                .append(
                    EntryId::new(format!("E-{i}")),
                    make_payload("SHIP-9", "IN_TRANSIT"),
                    100 * (i + 1),
                )
                .unwrap();
        }

        let leaves = sequencer.entry_hashes();
        assert_eq!(leaves.len(), 5);

        let tree = MerkleTree::from_leaves(leaves.clone());
        let root_first = tree.compute_root();
        let root_second = tree.compute_root();
        assert_eq!(root_first, root_second);

        // The fifth leaf has no sibling at the bottom level; its proof
        // still folds to the same root.
        let proof = tree.get_proof(4).unwrap();
        assert_eq!(proof.root_hash, root_first);
        assert!(proof.verify_leaf_hash(&leaves[4]));
    }

    // =========================================================================
    // SCENARIO: DIVERGENT HISTORIES
    // =========================================================================

    #[test]
    fn test_divergent_event_logs_replay_to_different_states() {
        let engine = StateReplayEngine::new(validator());
        let artifact_id = ArtifactId::new("SHIP-42");

        let delivered_log = vec![
            shipment_event("EV-1", "SHIPMENT_CREATED", 1, 1_000),
            shipment_event("EV-2", "SHIPMENT_DEPARTED", 2, 2_000),
            shipment_event("EV-3", "SHIPMENT_DELIVERED", 3, 3_000),
        ];
        let cancelled_log = vec![
            shipment_event("EV-1", "SHIPMENT_CREATED", 1, 1_000),
            shipment_event("EV-2", "SHIPMENT_DEPARTED", 2, 2_000),
            shipment_event("EV-3", "SHIPMENT_CANCELLED", 3, 3_000),
        ];

        let delivered = engine.replay_events(
            &delivered_log,
            ArtifactType::Shipment,
            &artifact_id,
            Some(ArtifactState::Shipment(ShipmentState::Delivered)),
            None,
        );
        assert!(delivered.is_deterministic);
        assert_eq!(delivered.computed_state_name(), Some("DELIVERED"));
        assert_eq!(delivered.state_matches, Some(true));

        let cancelled = engine.replay_events(
            &cancelled_log,
            ArtifactType::Shipment,
            &artifact_id,
            None,
            None,
        );
        assert_eq!(cancelled.computed_state_name(), Some("CANCELLED"));

        // Different histories can never share a state hash.
        assert_ne!(delivered.state_hash, cancelled.state_hash);
    }

    #[test]
    fn test_expecting_the_wrong_final_state_is_flagged() {
        let engine = StateReplayEngine::new(validator());
        let log = vec![
            shipment_event("EV-1", "SHIPMENT_CREATED", 1, 1_000),
            shipment_event("EV-2", "SHIPMENT_DEPARTED", 2, 2_000),
            shipment_event("EV-3", "SHIPMENT_CANCELLED", 3, 3_000),
        ];

        let result = engine.replay_events(
            &log,
            ArtifactType::Shipment,
            &ArtifactId::new("SHIP-42"),
            Some(ArtifactState::Shipment(ShipmentState::Delivered)),
            None,
        );

        assert!(!result.is_deterministic);
        assert_eq!(result.state_matches, Some(false));
        assert!(result
            .validation_errors
            .iter()
            .any(|v| matches!(v.violation_type, ViolationType::StateMismatch)));
    }

    // =========================================================================
    // SCENARIO: FINALIZED ARTIFACTS
    // =========================================================================

    #[test]
    fn test_no_transition_leaves_a_delivered_shipment() {
        let machine = StateMachine::new().unwrap();
        let delivered = ArtifactState::Shipment(ShipmentState::Delivered);
        assert!(machine.is_terminal(delivered));

        for target in [
            ArtifactState::Shipment(ShipmentState::Created),
            ArtifactState::Shipment(ShipmentState::InTransit),
            ArtifactState::Shipment(ShipmentState::Exception),
            ArtifactState::Shipment(ShipmentState::Cancelled),
        ] {
            assert!(!machine.is_valid_transition(ArtifactType::Shipment, delivered, target));
        }
    }

    #[test]
    fn test_finalized_artifact_rejects_transitions_with_critical_violation() {
        let transition = StateTransition::new(
            ArtifactId::new("SHIP-55"),
            ArtifactState::Shipment(ShipmentState::Delivered),
            ArtifactState::Shipment(ShipmentState::InTransit),
            5_000,
            "ops-gateway",
        );

        let result = validator().validate_transition(
            &transition,
            Some(ArtifactState::Shipment(ShipmentState::Delivered)),
            Some(4_000),
            true,
        );

        assert!(!result.is_valid);
        assert!(result.has_critical());
        let finality = result
            .violations
            .iter()
            .find(|v| matches!(v.violation_type, ViolationType::FinalityViolation))
            .expect("finality violation recorded");
        assert_eq!(finality.severity, Severity::Critical);
    }
}

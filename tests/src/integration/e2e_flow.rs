//! # End-to-End Lifecycle Flow
//!
//! Tests the complete artifact lifecycle pipeline:
//!
//! ```text
//! [Transition Validator (02)] ──proof──→ [Ledger Sequencer (03)]
//!                                              │
//!                                         entry hashes
//!                                              ↓
//!                                  [Merkle Accumulator (04)]
//!                                              │
//!                                         checkpoint
//!                                              ↓
//!      [Replay Engine (05)] ←──event log───────┤
//!              │                               │
//!         state hash                           │
//!              ↓                               ↓
//!                        [PDO Vault (06)]
//!                  seal → store → replay from raw inputs
//! ```

#[cfg(test)]
mod tests {
    use shared_types::{hash_to_hex, ArtifactId, EntryId, EventId, Payload, ProofId, ZERO_HASH};

    use pl_01_state_machine::{
        ArtifactState, ArtifactType, EventStateRecord, ShipmentState, StateMachine,
        StateTransition,
    };
    use pl_02_state_validation::{
        verify_chain, AuthorityGrant, AuthorityLevel, StateValidator, TransitionRequest,
        TransitionValidator, ValidatorConfig,
    };
    use pl_03_ledger_sequencer::LedgerSequencer;
    use pl_04_merkle_accumulator::{CheckpointProof, MerkleTree};
    use pl_05_replay_engine::StateReplayEngine;
    use pl_06_pdo_vault::{
        section_hash, ImmutablePDO, OutcomeStatus, PdoFields, PdoReplayEngine, PdoVault,
    };

    use serde_json::json;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn transition_validator() -> TransitionValidator {
        let machine = StateMachine::new().unwrap();
        let validator = StateValidator::with_config(machine, ValidatorConfig::for_testing());
        TransitionValidator::new(validator)
    }

    fn operator() -> AuthorityGrant {
        AuthorityGrant::new("ops-gateway", AuthorityLevel::Operator)
    }

    fn request(
        transition: StateTransition,
        current_state: Option<ArtifactState>,
        current_timestamp: Option<u64>,
        previous_proof_hash: Option<shared_types::Hash>,
    ) -> TransitionRequest {
        TransitionRequest {
            transition,
            current_state,
            current_timestamp,
            is_finalized: false,
            requesting_authority: operator(),
            previous_proof_hash,
        }
    }

    // =========================================================================
    // HAPPY PATH: VALIDATE → PROVE → SEQUENCE → ACCUMULATE → REPLAY → SEAL
    // =========================================================================

    #[test]
    fn test_full_artifact_lifecycle_pipeline() {
        let artifact_id = ArtifactId::new("SHIP-100");
        let validator = transition_validator();

        // --- Validate and prove two governed transitions ------------------
        let first = StateTransition::new(
            artifact_id.clone(),
            ArtifactState::Shipment(ShipmentState::Created),
            ArtifactState::Shipment(ShipmentState::InTransit),
            1_100,
            "ops-gateway",
        )
        .with_proof(ProofId::new("PRF-1"));
        let first_proof = validator
            .validate_and_emit(&request(
                first,
                Some(ArtifactState::Shipment(ShipmentState::Created)),
                Some(1_000),
                None,
            ))
            .unwrap();

        let second = StateTransition::new(
            artifact_id.clone(),
            ArtifactState::Shipment(ShipmentState::InTransit),
            ArtifactState::Shipment(ShipmentState::Delivered),
            1_200,
            "ops-gateway",
        )
        .with_proof(ProofId::new("PRF-2"));
        let second_proof = validator
            .validate_and_emit(&request(
                second,
                Some(ArtifactState::Shipment(ShipmentState::InTransit)),
                Some(1_100),
                Some(first_proof.proof_hash),
            ))
            .unwrap();

        let chain = vec![first_proof.clone(), second_proof.clone()];
        assert!(verify_chain(&chain).is_ok());

        // --- Sequence the proven transitions ------------------------------
        let sequencer = LedgerSequencer::new(1_000);
        for proof in &chain {
            let mut payload = Payload::new();
            payload.insert("artifact_id".into(), json!(proof.artifact_id.as_str()));
            payload.insert("to_state".into(), json!(proof.to_state.name()));
            payload.insert("proof_hash".into(), json!(hash_to_hex(&proof.proof_hash)));
            sequencer
                .append(
                    EntryId::new(format!("E-{}", proof.timestamp)),
                    payload,
                    proof.timestamp,
                )
                .unwrap();
        }
        assert!(sequencer.verify_sequence(0, 1).is_ok());

        // --- Accumulate entry hashes and checkpoint ------------------------
        let leaves = sequencer.entry_hashes();
        let tree = MerkleTree::from_leaves(leaves.clone());
        let checkpoint = CheckpointProof::capture(&tree, 1_300);
        assert!(checkpoint.matches(&tree));

        let inclusion = tree.get_proof(0).unwrap();
        assert!(inclusion.verify_leaf_hash(&leaves[0]));

        // --- Replay the event log and confirm the derived state ------------
        let events = vec![
            EventStateRecord::new(
                ArtifactType::Shipment,
                EventId::new("EV-1"),
                "SHIPMENT_CREATED",
                1,
                1_000,
            ),
            EventStateRecord::new(
                ArtifactType::Shipment,
                EventId::new("EV-2"),
                "SHIPMENT_DEPARTED",
                2,
                1_100,
            ),
            EventStateRecord::new(
                ArtifactType::Shipment,
                EventId::new("EV-3"),
                "SHIPMENT_DELIVERED",
                3,
                1_200,
            ),
        ];
        let machine = StateMachine::new().unwrap();
        let replay_engine = StateReplayEngine::new(StateValidator::with_config(
            machine,
            ValidatorConfig::for_testing(),
        ));
        let replay = replay_engine.replay_events(
            &events,
            ArtifactType::Shipment,
            &artifact_id,
            Some(ArtifactState::Shipment(ShipmentState::Delivered)),
            None,
        );
        assert!(replay.is_deterministic);
        assert_eq!(replay.transitions_applied, 3);

        // --- Seal the outcome as an immutable record ------------------------
        let mut proof_section = Payload::new();
        proof_section.insert("proof_chain_head".into(), json!(hash_to_hex(&second_proof.proof_hash)));
        let mut decision_section = Payload::new();
        decision_section.insert("ledger_root".into(), json!(hash_to_hex(&checkpoint.root_hash)));
        let mut outcome_section = Payload::new();
        outcome_section.insert("final_state".into(), json!(replay.computed_state_name()));
        outcome_section.insert("state_hash".into(), json!(replay.state_hash_hex()));

        let pdo = ImmutablePDO::seal(PdoFields {
            pdo_id: ArtifactId::new("PDO-SHIP-100"),
            pac_id: "pac-100".into(),
            wrap_id: "wrap-100".into(),
            ber_id: "ber-100".into(),
            proof_hash: section_hash(&proof_section),
            decision_hash: section_hash(&decision_section),
            outcome_hash: section_hash(&outcome_section),
            closure_id: "closure-2026-q1".into(),
            closure_hash: ZERO_HASH,
            proof_at: 1_200,
            decision_at: 1_250,
            outcome_at: 1_300,
            sealed_at: 1_350,
            outcome_status: OutcomeStatus::Approved,
            issuer: "governance-board".into(),
            schema_version: 1,
        });

        let vault = PdoVault::new();
        vault.store(pdo.clone()).unwrap();
        let stored = vault.get(&ArtifactId::new("PDO-SHIP-100")).unwrap();
        assert_eq!(stored.pdo_hash(), pdo.pdo_hash());
        assert_eq!(vault.verify_all().unwrap(), 1);

        // --- Reproduce the sealed record from the raw inputs ----------------
        let pdo_replay = PdoReplayEngine::new();
        assert!(pdo_replay
            .replay_pdo(&stored, &proof_section, &decision_section, &outcome_section)
            .is_ok());
    }

    // =========================================================================
    // REJECTION PATH: AN UNPROVEN OR UNDER-AUTHORIZED REQUEST NEVER REACHES
    // THE LEDGER
    // =========================================================================

    #[test]
    fn test_transition_without_proof_id_emits_no_proof() {
        let validator = transition_validator();
        let unproven = StateTransition::new(
            ArtifactId::new("SHIP-101"),
            ArtifactState::Shipment(ShipmentState::Created),
            ArtifactState::Shipment(ShipmentState::InTransit),
            1_100,
            "ops-gateway",
        );

        let err = validator
            .validate_and_emit(&request(unproven, None, None, None))
            .unwrap_err();
        let result = err.validation_result().expect("rejection carries findings");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_operator_cannot_cancel_a_shipment() {
        // Cancellation is declared supervisor-or-better.
        let validator = transition_validator();
        let cancel = StateTransition::new(
            ArtifactId::new("SHIP-102"),
            ArtifactState::Shipment(ShipmentState::InTransit),
            ArtifactState::Shipment(ShipmentState::Cancelled),
            1_100,
            "ops-gateway",
        )
        .with_proof(ProofId::new("PRF-9"));

        assert!(validator
            .validate_and_emit(&request(cancel.clone(), None, None, None))
            .is_err());

        // The same request passes with a supervisor grant.
        let supervised = TransitionRequest {
            transition: cancel,
            current_state: None,
            current_timestamp: None,
            is_finalized: false,
            requesting_authority: AuthorityGrant::new("shift-lead", AuthorityLevel::Supervisor),
            previous_proof_hash: None,
        };
        assert!(validator.validate_and_emit(&supervised).is_ok());
    }
}

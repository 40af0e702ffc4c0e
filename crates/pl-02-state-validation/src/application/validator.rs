//! # State Validator
//!
//! Pure, read-only rule checking. Every operation returns a
//! [`ValidationResult`]; nothing here mutates state or halts execution.

use serde_json::json;
use shared_types::{ArtifactId, Timestamp};
use tracing::debug;

use pl_01_state_machine::{ArtifactState, EventStateRecord, StateMachine, StateTransition};

use crate::config::ValidatorConfig;
use crate::domain::violations::{
    CurrentStateRecord, Severity, ValidationResult, Violation, ViolationType,
};

/// Read-only rule checker over a validated state machine.
#[derive(Clone, Debug)]
pub struct StateValidator {
    state_machine: StateMachine,
    config: ValidatorConfig,
}

impl StateValidator {
    /// Build a validator with default configuration.
    pub fn new(state_machine: StateMachine) -> Self {
        Self::with_config(state_machine, ValidatorConfig::default())
    }

    /// Build a validator with explicit configuration.
    pub fn with_config(state_machine: StateMachine, config: ValidatorConfig) -> Self {
        Self {
            state_machine,
            config,
        }
    }

    /// The state machine this validator consults.
    pub fn state_machine(&self) -> &StateMachine {
        &self.state_machine
    }

    /// Validate a single proposed transition.
    ///
    /// `current_state` and `current_timestamp` are the trusted live values
    /// when the caller holds them; passing `None` skips the corresponding
    /// single-truth and forward-only-time checks. `is_finalized` marks an
    /// artifact whose lifecycle has been closed for good.
    pub fn validate_transition(
        &self,
        transition: &StateTransition,
        current_state: Option<ArtifactState>,
        current_timestamp: Option<Timestamp>,
        is_finalized: bool,
    ) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let artifact_id = Some(transition.artifact_id.clone());

        if is_finalized {
            result.record(
                Violation::new(
                    ViolationType::FinalityViolation,
                    Severity::Critical,
                    artifact_id.clone(),
                    "transition attempted on a finalized artifact",
                )
                .with_evidence("attempted_to_state", json!(transition.to_state.name())),
            );
        }

        if let Some(current_ts) = current_timestamp {
            if transition.timestamp <= current_ts {
                result.record(
                    Violation::new(
                        ViolationType::BackwardTransition,
                        Severity::Critical,
                        artifact_id.clone(),
                        "transition timestamp does not move time forward",
                    )
                    .with_evidence("transition_timestamp", json!(transition.timestamp))
                    .with_evidence("current_timestamp", json!(current_ts)),
                );
            }
        }

        if self.config.require_proof && transition.proof_id.is_none() {
            result.record(Violation::new(
                ViolationType::MissingProof,
                Severity::High,
                artifact_id.clone(),
                "governed transition has no backing proof id",
            ));
        }

        if let Some(current) = current_state {
            if current != transition.from_state {
                result.record(
                    Violation::new(
                        ViolationType::ConflictingTruth,
                        Severity::Critical,
                        artifact_id.clone(),
                        "claimed from-state disagrees with trusted current state",
                    )
                    .with_evidence("claimed_from_state", json!(transition.from_state.name()))
                    .with_evidence("trusted_current_state", json!(current.name())),
                );
            }
        }

        if !self.state_machine.is_valid_transition(
            transition.artifact_type,
            transition.from_state,
            transition.to_state,
        ) {
            result.record(
                Violation::new(
                    ViolationType::InvalidTransition,
                    Severity::High,
                    artifact_id,
                    "transition pair is not in the declared table",
                )
                .with_evidence("from_state", json!(transition.from_state.name()))
                .with_evidence("to_state", json!(transition.to_state.name())),
            );
        }

        if !result.is_valid {
            debug!(
                artifact_id = %transition.artifact_id,
                violations = result.violations.len(),
                "transition validation failed"
            );
        }
        result
    }

    /// Validate an event batch for temporal and sequencing consistency.
    ///
    /// Events are sorted by sequence number first; timestamps must be
    /// non-decreasing across the sorted order. Sequence-number gaps are
    /// warnings by default (events may still be in flight).
    pub fn validate_event_sequence(&self, events: &[EventStateRecord]) -> ValidationResult {
        let mut result = ValidationResult::valid();
        if events.len() < 2 {
            return result;
        }

        let mut sorted: Vec<&EventStateRecord> = events.iter().collect();
        sorted.sort_by_key(|e| e.sequence_number);

        for pair in sorted.windows(2) {
            let (prev, next) = (pair[0], pair[1]);

            if next.timestamp < prev.timestamp {
                result.record(
                    Violation::new(
                        ViolationType::TemporalViolation,
                        Severity::High,
                        None,
                        "event timestamp regresses across sequence order",
                    )
                    .with_evidence("prev_event_id", json!(prev.event_id.as_str()))
                    .with_evidence("next_event_id", json!(next.event_id.as_str()))
                    .with_evidence("prev_timestamp", json!(prev.timestamp))
                    .with_evidence("next_timestamp", json!(next.timestamp)),
                );
            }

            if next.sequence_number > prev.sequence_number + 1 {
                let gap = Violation::new(
                    ViolationType::SequenceGap,
                    if self.config.gaps_are_violations {
                        Severity::High
                    } else {
                        Severity::Low
                    },
                    None,
                    "gap in event sequence numbers",
                )
                .with_evidence("after_sequence", json!(prev.sequence_number))
                .with_evidence("before_sequence", json!(next.sequence_number));

                if self.config.gaps_are_violations {
                    result.record(gap);
                } else {
                    result.warn(gap);
                }
            }
        }
        result
    }

    /// Check that the store holds exactly one current-state record for an
    /// artifact. More than one is a CRITICAL single-truth violation.
    pub fn validate_no_duplicate_states(
        &self,
        artifact_id: &ArtifactId,
        records: &[CurrentStateRecord],
    ) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let matching: Vec<&CurrentStateRecord> = records
            .iter()
            .filter(|r| &r.artifact_id == artifact_id)
            .collect();

        if matching.len() > 1 {
            let states: Vec<&str> = matching.iter().map(|r| r.state.name()).collect();
            result.record(
                Violation::new(
                    ViolationType::DuplicateState,
                    Severity::Critical,
                    Some(artifact_id.clone()),
                    format!("{} current-state records for one artifact", matching.len()),
                )
                .with_evidence("record_count", json!(matching.len()))
                .with_evidence("states", json!(states)),
            );
        }
        result
    }

    /// Check that a non-genesis artifact references a parent.
    pub fn validate_orphan_check(
        &self,
        artifact_id: &ArtifactId,
        parent_reference: Option<&ArtifactId>,
        is_genesis: bool,
    ) -> ValidationResult {
        let mut result = ValidationResult::valid();
        if parent_reference.is_none() && !is_genesis {
            result.record(Violation::new(
                ViolationType::OrphanArtifact,
                Severity::Medium,
                Some(artifact_id.clone()),
                "artifact has no parent reference and is not marked genesis",
            ));
        }
        result
    }
}

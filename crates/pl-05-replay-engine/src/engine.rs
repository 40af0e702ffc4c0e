//! # Replay Engine
//!
//! The deterministic fold. Sort, validate the sequence, derive the initial
//! state from the first event, fold the rest through the declared
//! transition table, hash the outcome.

use serde_json::json;
use shared_types::{sha256_parts, ArtifactId, Hash, Timestamp};
use tracing::debug;

use pl_01_state_machine::{state_for_event, ArtifactState, ArtifactType, EventStateRecord};
use pl_02_state_validation::{Severity, StateValidator, Violation, ViolationType};

use crate::result::ReplayResult;

/// Recomputes artifact state from an event log. Pure: holds only the
/// validator (itself pure) and mutates nothing.
#[derive(Clone, Debug)]
pub struct StateReplayEngine {
    validator: StateValidator,
}

impl StateReplayEngine {
    /// Build over a rule validator.
    pub fn new(validator: StateValidator) -> Self {
        Self { validator }
    }

    /// Replay an event log and compare against expectations.
    ///
    /// Events are sorted by (sequence number, timestamp) first, so the
    /// caller may hand over an unordered slice as long as sequence numbers
    /// define an order. `is_deterministic` is true iff zero validation
    /// errors occurred and every supplied expectation matched.
    pub fn replay_events(
        &self,
        events: &[EventStateRecord],
        artifact_type: ArtifactType,
        artifact_id: &ArtifactId,
        expected_final_state: Option<ArtifactState>,
        expected_hash: Option<Hash>,
    ) -> ReplayResult {
        self.replay_inner(events, artifact_type, artifact_id, expected_final_state, expected_hash, None)
    }

    /// Replay restricted to events at or before `target_time`.
    ///
    /// The same fold as [`replay_events`](Self::replay_events) over the
    /// filtered slice; used for dispute and point-in-time queries.
    pub fn compute_state_at_time(
        &self,
        events: &[EventStateRecord],
        artifact_type: ArtifactType,
        artifact_id: &ArtifactId,
        target_time: Timestamp,
    ) -> ReplayResult {
        let filtered: Vec<EventStateRecord> = events
            .iter()
            .filter(|e| e.timestamp <= target_time)
            .cloned()
            .collect();
        self.replay_inner(&filtered, artifact_type, artifact_id, None, None, Some(target_time))
    }

    fn replay_inner(
        &self,
        events: &[EventStateRecord],
        artifact_type: ArtifactType,
        artifact_id: &ArtifactId,
        expected_final_state: Option<ArtifactState>,
        expected_hash: Option<Hash>,
        as_of: Option<Timestamp>,
    ) -> ReplayResult {
        let mut sorted: Vec<&EventStateRecord> = events.iter().collect();
        sorted.sort_by_key(|e| (e.sequence_number, e.timestamp));

        let sequence_check = self.validator.validate_event_sequence(events);
        let mut errors = sequence_check.violations;
        let warnings = sequence_check.warnings;

        // An empty log derives no state; reporting it as a clean replay
        // would let a log tampered down to nothing pass unnoticed.
        if sorted.is_empty() {
            errors.push(Violation::new(
                ViolationType::UnderivableInitialState,
                Severity::High,
                Some(artifact_id.clone()),
                "no initial state derivable from an empty event log",
            ));
        }

        let mut current_state: Option<ArtifactState> = None;
        let mut last_timestamp: Timestamp = 0;
        let mut events_processed = 0usize;
        let mut transitions_applied = 0usize;

        for event in &sorted {
            events_processed += 1;
            last_timestamp = event.timestamp;

            let target = state_for_event(artifact_type, &event.event_type);
            match (current_state, target) {
                (None, Some(state)) => {
                    // First state-bearing event establishes the state.
                    current_state = Some(state);
                    transitions_applied += 1;
                }
                (None, None) => {
                    // Only the first event must be state-bearing; later
                    // no-ops before a state is established are counted
                    // but not re-flagged.
                    if events_processed == 1 {
                        errors.push(
                            Violation::new(
                                ViolationType::UnderivableInitialState,
                                Severity::High,
                                Some(artifact_id.clone()),
                                "no initial state derivable from first event",
                            )
                            .with_evidence("event_type", json!(event.event_type)),
                        );
                    }
                }
                (Some(state), Some(next)) if next != state => {
                    if self.validator.state_machine().is_valid_transition(
                        artifact_type,
                        state,
                        next,
                    ) {
                        current_state = Some(next);
                        transitions_applied += 1;
                    } else {
                        errors.push(
                            Violation::new(
                                ViolationType::InvalidTransition,
                                Severity::High,
                                Some(artifact_id.clone()),
                                "replayed event implies an undeclared transition",
                            )
                            .with_evidence("event_type", json!(event.event_type))
                            .with_evidence("from_state", json!(state.name()))
                            .with_evidence("to_state", json!(next.name())),
                        );
                    }
                }
                // Same-state and non-state-changing events are no-ops.
                (Some(_), _) => {}
            }
        }

        let state_hash = compute_state_hash(
            artifact_type,
            artifact_id,
            current_state,
            last_timestamp,
            events_processed,
            transitions_applied,
        );

        let state_matches = expected_final_state.map(|expected| {
            let matches = current_state == Some(expected);
            if !matches {
                errors.push(
                    Violation::new(
                        ViolationType::StateMismatch,
                        Severity::Critical,
                        Some(artifact_id.clone()),
                        "replayed final state differs from expectation",
                    )
                    .with_evidence("expected_state", json!(expected.name()))
                    .with_evidence(
                        "computed_state",
                        json!(current_state.map(|s| s.name())),
                    ),
                );
            }
            matches
        });

        let hashes_match = expected_hash.map(|expected| {
            let matches = state_hash == expected;
            if !matches {
                errors.push(Violation::new(
                    ViolationType::HashMismatch,
                    Severity::Critical,
                    Some(artifact_id.clone()),
                    "replayed state hash differs from expectation",
                ));
            }
            matches
        });

        let is_deterministic = errors.is_empty();
        if !is_deterministic {
            debug!(
                artifact_id = %artifact_id,
                errors = errors.len(),
                "replay diverged"
            );
        }

        ReplayResult {
            is_deterministic,
            computed_state: current_state,
            state_hash,
            hashes_match,
            state_matches,
            events_processed,
            transitions_applied,
            validation_errors: errors,
            warnings,
            as_of,
        }
    }
}

/// State hash over the replay outcome fields.
fn compute_state_hash(
    artifact_type: ArtifactType,
    artifact_id: &ArtifactId,
    state: Option<ArtifactState>,
    last_timestamp: Timestamp,
    event_count: usize,
    transition_count: usize,
) -> Hash {
    sha256_parts(&[
        artifact_type.to_string().as_bytes(),
        artifact_id.as_str().as_bytes(),
        state.map(|s| s.name()).unwrap_or("NONE").as_bytes(),
        &last_timestamp.to_le_bytes(),
        &(event_count as u64).to_le_bytes(),
        &(transition_count as u64).to_le_bytes(),
    ])
}

//! # Lifecycle Entities
//!
//! The two record types the rest of the ledger consumes: a requested state
//! transition and an event-sourced state record. Both are immutable once
//! constructed; a change of mind is expressed as a new record, never as an
//! edit.

use serde::{Deserialize, Serialize};
use shared_types::{ArtifactId, EventId, ProofId, Timestamp};

use super::states::{ArtifactState, ArtifactType};

/// A requested lifecycle transition for one artifact.
///
/// Immutable once constructed; it is only ever superseded by a later
/// `StateTransition` whose `from_state` is this one's `to_state`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Type of the governed artifact.
    pub artifact_type: ArtifactType,
    /// The artifact being transitioned.
    pub artifact_id: ArtifactId,
    /// State the requester believes the artifact is in.
    pub from_state: ArtifactState,
    /// State the requester wants to reach.
    pub to_state: ArtifactState,
    /// When the transition happened (ms since epoch).
    pub timestamp: Timestamp,
    /// Governance proof backing the transition. Optional at request time,
    /// required by the time the transition is validated.
    pub proof_id: Option<ProofId>,
    /// The authority requesting the transition.
    pub authority: String,
}

impl StateTransition {
    /// Build a transition request.
    pub fn new(
        artifact_id: ArtifactId,
        from_state: ArtifactState,
        to_state: ArtifactState,
        timestamp: Timestamp,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            artifact_type: from_state.artifact_type(),
            artifact_id,
            from_state,
            to_state,
            timestamp,
            proof_id: None,
            authority: authority.into(),
        }
    }

    /// Attach the backing proof.
    pub fn with_proof(mut self, proof_id: ProofId) -> Self {
        self.proof_id = Some(proof_id);
        self
    }
}

/// One lifecycle event consumed from the (externally ordered) event source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStateRecord {
    /// Type of the artifact this event belongs to.
    pub artifact_type: ArtifactType,
    /// Event identifier from the source system.
    pub event_id: EventId,
    /// Event type string, e.g. `SHIPMENT_DEPARTED`.
    pub event_type: String,
    /// Position in the source stream.
    pub sequence_number: u64,
    /// When the event occurred (ms since epoch).
    pub timestamp: Timestamp,
}

impl EventStateRecord {
    /// Build an event record.
    pub fn new(
        artifact_type: ArtifactType,
        event_id: EventId,
        event_type: impl Into<String>,
        sequence_number: u64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            artifact_type,
            event_id,
            event_type: event_type.into(),
            sequence_number,
            timestamp,
        }
    }
}

//! # Event → State Mapping
//!
//! Static lookup from event type to the lifecycle state the event drives
//! its artifact into. Non-state-changing events (scans, notes, access
//! records) map to `None` and are replayed as no-ops.

use super::states::{
    ArtifactState, ArtifactType, EventState, PdoState, ProofState, RiskVerdictState,
    SettlementState, ShipmentState,
};

/// The state an event type drives its artifact into, if any.
///
/// At most one target state per (artifact type, event type) pair. Unknown
/// event types map to `None`; the replay engine treats an unknown *first*
/// event as an error because no initial state can be derived from it.
pub fn state_for_event(artifact_type: ArtifactType, event_type: &str) -> Option<ArtifactState> {
    use ArtifactState as A;
    match artifact_type {
        ArtifactType::Shipment => match event_type {
            "SHIPMENT_CREATED" => Some(A::Shipment(ShipmentState::Created)),
            "SHIPMENT_DEPARTED" => Some(A::Shipment(ShipmentState::InTransit)),
            "SHIPMENT_DELIVERED" => Some(A::Shipment(ShipmentState::Delivered)),
            "SHIPMENT_EXCEPTION" => Some(A::Shipment(ShipmentState::Exception)),
            "SHIPMENT_RESOLVED" => Some(A::Shipment(ShipmentState::Resolved)),
            "SHIPMENT_CANCELLED" => Some(A::Shipment(ShipmentState::Cancelled)),
            // Telemetry that never changes lifecycle state.
            "SHIPMENT_SCANNED" | "SHIPMENT_NOTE_ADDED" => None,
            _ => None,
        },
        ArtifactType::Settlement => match event_type {
            "SETTLEMENT_INITIATED" => Some(A::Settlement(SettlementState::Initiated)),
            "SETTLEMENT_MATCHED" => Some(A::Settlement(SettlementState::Matched)),
            "SETTLEMENT_CLEARED" => Some(A::Settlement(SettlementState::Cleared)),
            "SETTLEMENT_RELEASED" => Some(A::Settlement(SettlementState::Released)),
            "SETTLEMENT_DISPUTED" => Some(A::Settlement(SettlementState::Disputed)),
            "SETTLEMENT_RESOLVED" => Some(A::Settlement(SettlementState::Resolved)),
            "SETTLEMENT_REJECTED" => Some(A::Settlement(SettlementState::Rejected)),
            _ => None,
        },
        ArtifactType::Pdo => match event_type {
            "PDO_ASSEMBLED" => Some(A::Pdo(PdoState::Assembled)),
            "PDO_SEALED" => Some(A::Pdo(PdoState::Sealed)),
            "PDO_ARCHIVED" => Some(A::Pdo(PdoState::Archived)),
            "PDO_VOIDED" => Some(A::Pdo(PdoState::Voided)),
            "PDO_ACCESSED" => None,
            _ => None,
        },
        ArtifactType::Proof => match event_type {
            "PROOF_REQUESTED" => Some(A::Proof(ProofState::Pending)),
            "PROOF_ISSUED" => Some(A::Proof(ProofState::Issued)),
            "PROOF_VERIFIED" => Some(A::Proof(ProofState::Verified)),
            "PROOF_REVOKED" => Some(A::Proof(ProofState::Revoked)),
            _ => None,
        },
        ArtifactType::RiskVerdict => match event_type {
            "RISK_OPENED" => Some(A::RiskVerdict(RiskVerdictState::Open)),
            "RISK_ASSESSED" => Some(A::RiskVerdict(RiskVerdictState::Assessed)),
            "RISK_CLEARED" => Some(A::RiskVerdict(RiskVerdictState::Cleared)),
            "RISK_FLAGGED" => Some(A::RiskVerdict(RiskVerdictState::Flagged)),
            "RISK_ESCALATED" => Some(A::RiskVerdict(RiskVerdictState::Escalated)),
            _ => None,
        },
        ArtifactType::Event => match event_type {
            "EVENT_RECEIVED" => Some(A::Event(EventState::Received)),
            "EVENT_APPLIED" => Some(A::Event(EventState::Applied)),
            "EVENT_DISCARDED" => Some(A::Event(EventState::Discarded)),
            _ => None,
        },
    }
}

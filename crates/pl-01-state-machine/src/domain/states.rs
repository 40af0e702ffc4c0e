//! # Artifact Types and Lifecycle States
//!
//! Closed enums for every governed artifact type and its lifecycle states.
//! An unhandled state is a compile-time error, not a runtime fallthrough.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of governed artifact types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactType {
    /// Physical shipment moving through a logistics lifecycle.
    Shipment,
    /// Financial settlement between counterparties.
    Settlement,
    /// Proof-Decision-Outcome record of one governed decision.
    Pdo,
    /// Governance proof backing transitions of other artifacts.
    Proof,
    /// Risk assessment verdict for a counterparty or shipment.
    RiskVerdict,
    /// Raw lifecycle event consumed from the event source.
    Event,
}

impl ArtifactType {
    /// All artifact types, for schema iteration.
    pub const ALL: [ArtifactType; 6] = [
        ArtifactType::Shipment,
        ArtifactType::Settlement,
        ArtifactType::Pdo,
        ArtifactType::Proof,
        ArtifactType::RiskVerdict,
        ArtifactType::Event,
    ];
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactType::Shipment => "SHIPMENT",
            ArtifactType::Settlement => "SETTLEMENT",
            ArtifactType::Pdo => "PDO",
            ArtifactType::Proof => "PROOF",
            ArtifactType::RiskVerdict => "RISK_VERDICT",
            ArtifactType::Event => "EVENT",
        };
        f.write_str(name)
    }
}

/// Shipment lifecycle states.
///
/// Progression: Created → InTransit → Delivered, with Exception → Resolved
/// and Cancelled as the abort path. Delivered, Resolved, and Cancelled are
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentState {
    /// Shipment registered, not yet moving.
    Created,
    /// Picked up and moving.
    InTransit,
    /// Arrived at destination (terminal).
    Delivered,
    /// A problem was reported in transit.
    Exception,
    /// Reported exception settled (terminal).
    Resolved,
    /// Aborted before delivery (terminal).
    Cancelled,
}

/// Settlement lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementState {
    /// Settlement opened by one counterparty.
    Initiated,
    /// Counterparty instructions matched.
    Matched,
    /// Funds cleared and held.
    Cleared,
    /// Funds released to beneficiary (terminal).
    Released,
    /// One side raised a dispute.
    Disputed,
    /// Dispute closed by a ruling (terminal).
    Resolved,
    /// Settlement refused (terminal).
    Rejected,
}

/// PDO (Proof-Decision-Outcome) record lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PdoState {
    /// Proof, decision, and outcome sections gathered.
    Assembled,
    /// Content hash bound; record is immutable from here on.
    Sealed,
    /// Moved to long-term audit storage (terminal).
    Archived,
    /// Withdrawn before sealing (terminal).
    Voided,
}

/// Governance proof lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofState {
    /// Requested, not yet issued.
    Pending,
    /// Issued by an authority.
    Issued,
    /// Independently verified (terminal).
    Verified,
    /// Withdrawn by the issuer (terminal).
    Revoked,
}

/// Risk verdict lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskVerdictState {
    /// Assessment requested.
    Open,
    /// Assessment complete, verdict pending review.
    Assessed,
    /// No risk found (terminal).
    Cleared,
    /// Risk found, under review.
    Flagged,
    /// Escalated to human governance (terminal).
    Escalated,
}

/// Event record lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    /// Accepted from the event source.
    Received,
    /// Folded into artifact state (terminal).
    Applied,
    /// Rejected as malformed or duplicate (terminal).
    Discarded,
}

/// A lifecycle state of some artifact, tagged by artifact type.
///
/// The tag makes cross-type confusion unrepresentable: a `ShipmentState`
/// can never be compared against a settlement transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "artifact_type", content = "state")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactState {
    /// A shipment state.
    Shipment(ShipmentState),
    /// A settlement state.
    Settlement(SettlementState),
    /// A PDO state.
    Pdo(PdoState),
    /// A proof state.
    Proof(ProofState),
    /// A risk verdict state.
    RiskVerdict(RiskVerdictState),
    /// An event state.
    Event(EventState),
}

impl ArtifactState {
    /// The artifact type this state belongs to.
    pub fn artifact_type(&self) -> ArtifactType {
        match self {
            ArtifactState::Shipment(_) => ArtifactType::Shipment,
            ArtifactState::Settlement(_) => ArtifactType::Settlement,
            ArtifactState::Pdo(_) => ArtifactType::Pdo,
            ArtifactState::Proof(_) => ArtifactType::Proof,
            ArtifactState::RiskVerdict(_) => ArtifactType::RiskVerdict,
            ArtifactState::Event(_) => ArtifactType::Event,
        }
    }

    /// Canonical SCREAMING_SNAKE_CASE name, as used in audit output.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactState::Shipment(s) => match s {
                ShipmentState::Created => "CREATED",
                ShipmentState::InTransit => "IN_TRANSIT",
                ShipmentState::Delivered => "DELIVERED",
                ShipmentState::Exception => "EXCEPTION",
                ShipmentState::Resolved => "RESOLVED",
                ShipmentState::Cancelled => "CANCELLED",
            },
            ArtifactState::Settlement(s) => match s {
                SettlementState::Initiated => "INITIATED",
                SettlementState::Matched => "MATCHED",
                SettlementState::Cleared => "CLEARED",
                SettlementState::Released => "RELEASED",
                SettlementState::Disputed => "DISPUTED",
                SettlementState::Resolved => "RESOLVED",
                SettlementState::Rejected => "REJECTED",
            },
            ArtifactState::Pdo(s) => match s {
                PdoState::Assembled => "ASSEMBLED",
                PdoState::Sealed => "SEALED",
                PdoState::Archived => "ARCHIVED",
                PdoState::Voided => "VOIDED",
            },
            ArtifactState::Proof(s) => match s {
                ProofState::Pending => "PENDING",
                ProofState::Issued => "ISSUED",
                ProofState::Verified => "VERIFIED",
                ProofState::Revoked => "REVOKED",
            },
            ArtifactState::RiskVerdict(s) => match s {
                RiskVerdictState::Open => "OPEN",
                RiskVerdictState::Assessed => "ASSESSED",
                RiskVerdictState::Cleared => "CLEARED",
                RiskVerdictState::Flagged => "FLAGGED",
                RiskVerdictState::Escalated => "ESCALATED",
            },
            ArtifactState::Event(s) => match s {
                EventState::Received => "RECEIVED",
                EventState::Applied => "APPLIED",
                EventState::Discarded => "DISCARDED",
            },
        }
    }

    /// Parse a canonical state name for a given artifact type.
    ///
    /// Returns `None` for names the artifact type does not declare; state
    /// names are only unique within a type (`RESOLVED` exists for both
    /// shipments and settlements).
    pub fn parse(artifact_type: ArtifactType, name: &str) -> Option<ArtifactState> {
        use ArtifactState as A;
        let state = match artifact_type {
            ArtifactType::Shipment => A::Shipment(match name {
                "CREATED" => ShipmentState::Created,
                "IN_TRANSIT" => ShipmentState::InTransit,
                "DELIVERED" => ShipmentState::Delivered,
                "EXCEPTION" => ShipmentState::Exception,
                "RESOLVED" => ShipmentState::Resolved,
                "CANCELLED" => ShipmentState::Cancelled,
                _ => return None,
            }),
            ArtifactType::Settlement => A::Settlement(match name {
                "INITIATED" => SettlementState::Initiated,
                "MATCHED" => SettlementState::Matched,
                "CLEARED" => SettlementState::Cleared,
                "RELEASED" => SettlementState::Released,
                "DISPUTED" => SettlementState::Disputed,
                "RESOLVED" => SettlementState::Resolved,
                "REJECTED" => SettlementState::Rejected,
                _ => return None,
            }),
            ArtifactType::Pdo => A::Pdo(match name {
                "ASSEMBLED" => PdoState::Assembled,
                "SEALED" => PdoState::Sealed,
                "ARCHIVED" => PdoState::Archived,
                "VOIDED" => PdoState::Voided,
                _ => return None,
            }),
            ArtifactType::Proof => A::Proof(match name {
                "PENDING" => ProofState::Pending,
                "ISSUED" => ProofState::Issued,
                "VERIFIED" => ProofState::Verified,
                "REVOKED" => ProofState::Revoked,
                _ => return None,
            }),
            ArtifactType::RiskVerdict => A::RiskVerdict(match name {
                "OPEN" => RiskVerdictState::Open,
                "ASSESSED" => RiskVerdictState::Assessed,
                "CLEARED" => RiskVerdictState::Cleared,
                "FLAGGED" => RiskVerdictState::Flagged,
                "ESCALATED" => RiskVerdictState::Escalated,
                _ => return None,
            }),
            ArtifactType::Event => A::Event(match name {
                "RECEIVED" => EventState::Received,
                "APPLIED" => EventState::Applied,
                "DISCARDED" => EventState::Discarded,
                _ => return None,
            }),
        };
        Some(state)
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

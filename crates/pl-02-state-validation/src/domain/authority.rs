//! # Authority Model
//!
//! Ordered authority levels and the per-(artifact type, target state)
//! requirement table for governed transitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use pl_01_state_machine::{
    ArtifactState, ArtifactType, PdoState, SettlementState, ShipmentState,
};

/// Authority levels, least to most privileged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorityLevel {
    /// Day-to-day operational systems.
    Operator,
    /// Human or automated supervisor sign-off.
    Supervisor,
    /// Independent audit function.
    Auditor,
    /// Governance board decision.
    Governance,
}

/// An authority entry accompanying a transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityGrant {
    /// Who is requesting (service account, officer id, ...).
    pub name: String,
    /// The level the requester holds.
    pub level: AuthorityLevel,
}

impl AuthorityGrant {
    /// Build a grant.
    pub fn new(name: impl Into<String>, level: AuthorityLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// Required authority level per (artifact type, target state).
///
/// Pairs not present in the table require the default level. The table is
/// injectable so embedders can tighten or relax requirements without
/// touching validation logic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorityTable {
    requirements: HashMap<(ArtifactType, ArtifactState), AuthorityLevel>,
    default_level: AuthorityLevel,
}

impl AuthorityTable {
    /// The built-in table: governance-sensitive targets (terminal states
    /// that move money or seal records) need Supervisor or better, the
    /// rest pass at Operator.
    pub fn builtin() -> Self {
        use ArtifactState as A;
        let mut requirements = HashMap::new();
        requirements.insert(
            (ArtifactType::Settlement, A::Settlement(SettlementState::Released)),
            AuthorityLevel::Supervisor,
        );
        requirements.insert(
            (ArtifactType::Settlement, A::Settlement(SettlementState::Resolved)),
            AuthorityLevel::Auditor,
        );
        requirements.insert(
            (ArtifactType::Shipment, A::Shipment(ShipmentState::Cancelled)),
            AuthorityLevel::Supervisor,
        );
        requirements.insert(
            (ArtifactType::Pdo, A::Pdo(PdoState::Sealed)),
            AuthorityLevel::Supervisor,
        );
        requirements.insert(
            (ArtifactType::Pdo, A::Pdo(PdoState::Voided)),
            AuthorityLevel::Governance,
        );
        Self {
            requirements,
            default_level: AuthorityLevel::Operator,
        }
    }

    /// An empty table with a uniform default level.
    pub fn uniform(default_level: AuthorityLevel) -> Self {
        Self {
            requirements: HashMap::new(),
            default_level,
        }
    }

    /// Declare a requirement for one target state.
    pub fn require(
        mut self,
        artifact_type: ArtifactType,
        to_state: ArtifactState,
        level: AuthorityLevel,
    ) -> Self {
        self.requirements.insert((artifact_type, to_state), level);
        self
    }

    /// The level required to reach `to_state`.
    pub fn required_level(
        &self,
        artifact_type: ArtifactType,
        to_state: ArtifactState,
    ) -> AuthorityLevel {
        self.requirements
            .get(&(artifact_type, to_state))
            .copied()
            .unwrap_or(self.default_level)
    }
}

impl Default for AuthorityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

//! # State Schema and State Machine
//!
//! Declared transition tables per artifact type, and the generic engine
//! that interprets them. The schema is validated once at construction and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

use super::states::{
    ArtifactState, ArtifactType, EventState, PdoState, ProofState, RiskVerdictState,
    SettlementState, ShipmentState,
};

/// Schema validation failure. Fatal at startup, never recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A transition references a state belonging to a different artifact
    /// type than the table it appears in.
    #[error("schema for {artifact_type} references foreign state {state}")]
    ForeignState {
        /// Artifact type whose table is broken.
        artifact_type: ArtifactType,
        /// The offending state name.
        state: String,
    },

    /// A terminal state has an outbound edge.
    #[error("terminal state {state} of {artifact_type} has an outbound edge")]
    TerminalOutboundEdge {
        /// Artifact type whose table is broken.
        artifact_type: ArtifactType,
        /// The terminal state with an outbound edge.
        state: String,
    },

    /// A declared "to" state is not reachable from the initial state.
    #[error("state {state} of {artifact_type} is unreachable from the initial state")]
    UnreachableState {
        /// Artifact type whose table is broken.
        artifact_type: ArtifactType,
        /// The unreachable state name.
        state: String,
    },

    /// An artifact type has no schema entry at all.
    #[error("no schema declared for artifact type {0}")]
    MissingSchema(ArtifactType),

    /// The declared initial state is terminal, so no artifact could ever
    /// make a single transition.
    #[error("initial state {state} of {artifact_type} is terminal")]
    TerminalInitialState {
        /// Artifact type whose table is broken.
        artifact_type: ArtifactType,
        /// The terminal initial state.
        state: String,
    },
}

/// Declared lifecycle for one artifact type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSchema {
    /// State every new artifact of this type starts in.
    pub initial: ArtifactState,
    /// Allowed (from, to) transition pairs.
    pub transitions: Vec<(ArtifactState, ArtifactState)>,
    /// States with no outbound edges; reaching one ends the lifecycle.
    pub terminal: Vec<ArtifactState>,
}

/// Declared transition tables for every artifact type. Pure data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateSchema {
    tables: HashMap<ArtifactType, TypeSchema>,
}

impl StateSchema {
    /// The built-in schema covering all six artifact types.
    pub fn builtin() -> Self {
        use ArtifactState as A;

        let mut tables = HashMap::new();

        tables.insert(
            ArtifactType::Shipment,
            TypeSchema {
                initial: A::Shipment(ShipmentState::Created),
                transitions: vec![
                    (A::Shipment(ShipmentState::Created), A::Shipment(ShipmentState::InTransit)),
                    (A::Shipment(ShipmentState::Created), A::Shipment(ShipmentState::Cancelled)),
                    (A::Shipment(ShipmentState::InTransit), A::Shipment(ShipmentState::Delivered)),
                    (A::Shipment(ShipmentState::InTransit), A::Shipment(ShipmentState::Exception)),
                    (A::Shipment(ShipmentState::InTransit), A::Shipment(ShipmentState::Cancelled)),
                    (A::Shipment(ShipmentState::Exception), A::Shipment(ShipmentState::Resolved)),
                    (A::Shipment(ShipmentState::Exception), A::Shipment(ShipmentState::Cancelled)),
                ],
                terminal: vec![
                    A::Shipment(ShipmentState::Delivered),
                    A::Shipment(ShipmentState::Resolved),
                    A::Shipment(ShipmentState::Cancelled),
                ],
            },
        );

        tables.insert(
            ArtifactType::Settlement,
            TypeSchema {
                initial: A::Settlement(SettlementState::Initiated),
                transitions: vec![
                    (A::Settlement(SettlementState::Initiated), A::Settlement(SettlementState::Matched)),
                    (A::Settlement(SettlementState::Initiated), A::Settlement(SettlementState::Rejected)),
                    (A::Settlement(SettlementState::Matched), A::Settlement(SettlementState::Cleared)),
                    (A::Settlement(SettlementState::Matched), A::Settlement(SettlementState::Disputed)),
                    (A::Settlement(SettlementState::Cleared), A::Settlement(SettlementState::Released)),
                    (A::Settlement(SettlementState::Cleared), A::Settlement(SettlementState::Disputed)),
                    (A::Settlement(SettlementState::Disputed), A::Settlement(SettlementState::Resolved)),
                    (A::Settlement(SettlementState::Disputed), A::Settlement(SettlementState::Rejected)),
                ],
                terminal: vec![
                    A::Settlement(SettlementState::Released),
                    A::Settlement(SettlementState::Resolved),
                    A::Settlement(SettlementState::Rejected),
                ],
            },
        );

        tables.insert(
            ArtifactType::Pdo,
            TypeSchema {
                initial: A::Pdo(PdoState::Assembled),
                transitions: vec![
                    (A::Pdo(PdoState::Assembled), A::Pdo(PdoState::Sealed)),
                    (A::Pdo(PdoState::Assembled), A::Pdo(PdoState::Voided)),
                    (A::Pdo(PdoState::Sealed), A::Pdo(PdoState::Archived)),
                ],
                terminal: vec![A::Pdo(PdoState::Archived), A::Pdo(PdoState::Voided)],
            },
        );

        tables.insert(
            ArtifactType::Proof,
            TypeSchema {
                initial: A::Proof(ProofState::Pending),
                transitions: vec![
                    (A::Proof(ProofState::Pending), A::Proof(ProofState::Issued)),
                    (A::Proof(ProofState::Pending), A::Proof(ProofState::Revoked)),
                    (A::Proof(ProofState::Issued), A::Proof(ProofState::Verified)),
                    (A::Proof(ProofState::Issued), A::Proof(ProofState::Revoked)),
                ],
                terminal: vec![A::Proof(ProofState::Verified), A::Proof(ProofState::Revoked)],
            },
        );

        tables.insert(
            ArtifactType::RiskVerdict,
            TypeSchema {
                initial: A::RiskVerdict(RiskVerdictState::Open),
                transitions: vec![
                    (A::RiskVerdict(RiskVerdictState::Open), A::RiskVerdict(RiskVerdictState::Assessed)),
                    (A::RiskVerdict(RiskVerdictState::Assessed), A::RiskVerdict(RiskVerdictState::Cleared)),
                    (A::RiskVerdict(RiskVerdictState::Assessed), A::RiskVerdict(RiskVerdictState::Flagged)),
                    (A::RiskVerdict(RiskVerdictState::Flagged), A::RiskVerdict(RiskVerdictState::Escalated)),
                    (A::RiskVerdict(RiskVerdictState::Flagged), A::RiskVerdict(RiskVerdictState::Cleared)),
                ],
                terminal: vec![
                    A::RiskVerdict(RiskVerdictState::Cleared),
                    A::RiskVerdict(RiskVerdictState::Escalated),
                ],
            },
        );

        tables.insert(
            ArtifactType::Event,
            TypeSchema {
                initial: A::Event(EventState::Received),
                transitions: vec![
                    (A::Event(EventState::Received), A::Event(EventState::Applied)),
                    (A::Event(EventState::Received), A::Event(EventState::Discarded)),
                ],
                terminal: vec![A::Event(EventState::Applied), A::Event(EventState::Discarded)],
            },
        );

        Self { tables }
    }

    /// Table for one artifact type, if declared.
    pub fn table(&self, artifact_type: ArtifactType) -> Option<&TypeSchema> {
        self.tables.get(&artifact_type)
    }

    /// Build a schema from explicit tables (for embedders with custom
    /// lifecycles). Still subject to the same self-check.
    pub fn from_tables(tables: HashMap<ArtifactType, TypeSchema>) -> Self {
        Self { tables }
    }
}

impl Default for StateSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Validate every declared state machine in a schema.
///
/// Fails closed on:
/// - a transition or terminal entry whose state belongs to another type
/// - a terminal state with an outbound edge
/// - a declared "to" state unreachable from the initial state
/// - an artifact type with no table
/// - a terminal initial state
///
/// Runs once at startup; a failure here must abort initialization.
pub fn validate_all_state_machines(schema: &StateSchema) -> Result<(), SchemaError> {
    for artifact_type in ArtifactType::ALL {
        let table = schema
            .table(artifact_type)
            .ok_or(SchemaError::MissingSchema(artifact_type))?;

        let terminal: HashSet<ArtifactState> = table.terminal.iter().copied().collect();

        // Type confinement: every referenced state belongs to this table's type.
        let mut check_type = |state: &ArtifactState| -> Result<(), SchemaError> {
            if state.artifact_type() != artifact_type {
                return Err(SchemaError::ForeignState {
                    artifact_type,
                    state: state.name().to_string(),
                });
            }
            Ok(())
        };
        check_type(&table.initial)?;
        for (from, to) in &table.transitions {
            check_type(from)?;
            check_type(to)?;
        }
        for state in &table.terminal {
            check_type(state)?;
        }

        if terminal.contains(&table.initial) {
            return Err(SchemaError::TerminalInitialState {
                artifact_type,
                state: table.initial.name().to_string(),
            });
        }

        for (from, _) in &table.transitions {
            if terminal.contains(from) {
                return Err(SchemaError::TerminalOutboundEdge {
                    artifact_type,
                    state: from.name().to_string(),
                });
            }
        }

        // Reachability: every declared "to" state must be reachable from
        // the initial state by following declared edges.
        let mut reachable: HashSet<ArtifactState> = HashSet::new();
        let mut queue = VecDeque::from([table.initial]);
        reachable.insert(table.initial);
        while let Some(state) = queue.pop_front() {
            for (from, to) in &table.transitions {
                if *from == state && reachable.insert(*to) {
                    queue.push_back(*to);
                }
            }
        }
        for (_, to) in &table.transitions {
            if !reachable.contains(to) {
                return Err(SchemaError::UnreachableState {
                    artifact_type,
                    state: to.name().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Generic engine interpreting a validated [`StateSchema`].
///
/// Construction runs the schema self-check and fails closed; a
/// `StateMachine` value therefore always wraps a consistent schema.
#[derive(Clone, Debug)]
pub struct StateMachine {
    schema: StateSchema,
}

impl StateMachine {
    /// Build the engine over the built-in schema.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_schema(StateSchema::builtin())
    }

    /// Build the engine over a caller-supplied schema.
    pub fn with_schema(schema: StateSchema) -> Result<Self, SchemaError> {
        validate_all_state_machines(&schema)?;
        Ok(Self { schema })
    }

    /// Is `(from, to)` a declared transition for this artifact type?
    ///
    /// States of the wrong artifact type are never valid, regardless of
    /// what the table says.
    pub fn is_valid_transition(
        &self,
        artifact_type: ArtifactType,
        from: ArtifactState,
        to: ArtifactState,
    ) -> bool {
        if from.artifact_type() != artifact_type || to.artifact_type() != artifact_type {
            return false;
        }
        self.schema
            .table(artifact_type)
            .map(|t| t.transitions.iter().any(|(f, s)| *f == from && *s == to))
            .unwrap_or(false)
    }

    /// Terminal states of an artifact type.
    pub fn terminal_states(&self, artifact_type: ArtifactType) -> HashSet<ArtifactState> {
        self.schema
            .table(artifact_type)
            .map(|t| t.terminal.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Is this state terminal for its artifact type?
    pub fn is_terminal(&self, state: ArtifactState) -> bool {
        self.terminal_states(state.artifact_type()).contains(&state)
    }

    /// Initial state of an artifact type.
    ///
    /// Always present: construction rejected schemas with missing tables.
    pub fn initial_state(&self, artifact_type: ArtifactType) -> ArtifactState {
        self.schema
            .table(artifact_type)
            .map(|t| t.initial)
            .expect("schema validated at construction covers every artifact type")
    }

    /// The underlying schema (read-only).
    pub fn schema(&self) -> &StateSchema {
        &self.schema
    }
}

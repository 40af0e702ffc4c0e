//! # PL-01 Artifact State Machine
//!
//! Declared lifecycle state machines for governed artifacts.
//!
//! ## Purpose
//!
//! Every governed artifact type (shipment, settlement, PDO, proof, risk
//! verdict, event) has a closed state enum and a declared transition table.
//! This crate answers exactly three questions:
//!
//! - Is `(from, to)` a declared transition for this artifact type?
//! - Which states are terminal?
//! - What is the initial state?
//!
//! It never mutates anything and it never decides policy; callers layer
//! validation and authority checks on top (see `pl-02-state-validation`).
//!
//! ## Fail-closed schema check
//!
//! [`StateMachine::new`] runs [`validate_all_state_machines`] before serving
//! a single query. A schema that declares a transition out of a terminal
//! state, references a state of the wrong artifact type, or declares an
//! unreachable target state is rejected outright; no partially-valid schema
//! is ever served.
//!
//! ## Module Structure
//!
//! ```text
//! pl-01-state-machine/
//! ├── domain/
//! │   ├── states.rs     # ArtifactType + per-type state enums + ArtifactState
//! │   ├── schema.rs     # StateSchema, StateMachine, schema self-check
//! │   ├── events.rs     # static event-type → state lookup
//! │   └── entities.rs   # StateTransition, EventStateRecord
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

pub use domain::entities::{EventStateRecord, StateTransition};
pub use domain::events::state_for_event;
pub use domain::schema::{validate_all_state_machines, SchemaError, StateMachine, StateSchema};
pub use domain::states::{
    ArtifactState, ArtifactType, EventState, PdoState, ProofState, RiskVerdictState,
    SettlementState, ShipmentState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # PL-02 State Validation
//!
//! Read-only rule checking for artifact lifecycle transitions, plus the
//! authority-gated transition validator that emits hash-chained transition
//! proofs.
//!
//! ## Two layers
//!
//! - [`StateValidator`] is a pure rule checker. It inspects a proposed
//!   transition (or a batch of events) against the forward-only-time,
//!   single-current-state, proof-required, and declared-transition
//!   invariants and returns a [`ValidationResult`]. It never halts
//!   execution and never mutates anything; callers decide whether a
//!   CRITICAL violation is fatal.
//! - [`TransitionValidator`] layers authority requirements on top and, on
//!   full success, emits a [`StateTransitionProof`] whose hash binds the
//!   transition to its per-artifact predecessor proof. Missing proof or
//!   insufficient authority fails closed.
//!
//! ## Module Structure
//!
//! ```text
//! pl-02-state-validation/
//! ├── domain/
//! │   ├── violations.rs  # Severity, ViolationType, Violation, ValidationResult
//! │   ├── authority.rs   # AuthorityLevel, AuthorityTable
//! │   └── errors.rs      # TransitionError
//! ├── application/
//! │   ├── validator.rs   # StateValidator (pure rule checks)
//! │   └── transition.rs  # TransitionValidator + TransitionProofEmitter
//! └── config.rs          # ValidatorConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;

pub use application::transition::{
    genesis_proof_hash, verify_chain, StateTransitionProof, TransitionProofEmitter,
    TransitionRequest, TransitionValidator,
};
pub use application::validator::StateValidator;
pub use config::ValidatorConfig;
pub use domain::authority::{AuthorityGrant, AuthorityLevel, AuthorityTable};
pub use domain::errors::TransitionError;
pub use domain::violations::{
    CurrentStateRecord, Severity, ValidationResult, Violation, ViolationType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

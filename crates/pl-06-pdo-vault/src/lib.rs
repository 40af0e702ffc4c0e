//! # PL-06 PDO Vault
//!
//! Immutable Proof-Decision-Outcome records and their append-only vault.
//!
//! ## Immutability by construction
//!
//! An [`ImmutablePDO`] binds its identity to a content hash over every
//! other field. The checked constructor recomputes that hash and fails
//! closed on disagreement, so a live instance with a stale hash cannot
//! exist. The vault re-verifies on every read, stores a record per id
//! exactly once (a duplicate id is treated as a mutation attempt, not an
//! update), and keeps an append-only access log.
//!
//! [`PdoReplayEngine`] independently recomputes the section hashes from
//! the raw proof/decision/outcome inputs and raises a field-level
//! divergence error when a historical record was not honestly derived.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod replay;
pub mod vault;

pub use config::VaultConfig;
pub use domain::errors::PdoError;
pub use domain::pdo::{
    section_hash, verify_closure_chain, ImmutablePDO, OutcomeStatus, PdoFields,
};
pub use replay::PdoReplayEngine;
pub use vault::{AccessOperation, AccessRecord, PdoVault};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

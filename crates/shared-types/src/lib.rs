//! # Shared Types Crate
//!
//! Cross-subsystem primitives for the Provenance-Ledger workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: hash primitives, identifier newtypes, and
//!   the canonical payload encoding are defined here and nowhere else.
//! - **Immutability by construction**: identifier newtypes are `Copy`-free
//!   opaque strings that are never rewritten after creation.
//! - **Deterministic encoding**: every hash input goes through the canonical
//!   encoding in [`canonical`], so two processes always hash identical bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod hashing;
pub mod ids;

pub use canonical::{to_canonical_json, CanonicalError, Payload};
pub use hashing::{hash_to_hex, sha256, sha256_concat, sha256_parts, Hash, ZERO_HASH};
pub use ids::{ArtifactId, EntryId, EventId, ProofId, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

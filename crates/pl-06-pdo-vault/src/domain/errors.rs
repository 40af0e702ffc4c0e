//! # PDO Immutability Errors
//!
//! Every variant is fatal to the specific operation; none is retried
//! inside the core.

use shared_types::ArtifactId;
use thiserror::Error;

/// Immutability and integrity failures around PDO records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PdoError {
    /// A store was attempted for an id the vault already holds.
    #[error("mutation attempt: vault already holds PDO {pdo_id}")]
    MutationAttempt {
        /// The id that already exists.
        pdo_id: ArtifactId,
    },

    /// The vault's configured record capacity is exhausted.
    #[error("vault capacity of {limit} records exhausted")]
    CapacityExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A PDO's content hash does not recompute from its fields.
    #[error("hash verification failed for PDO {pdo_id}")]
    HashVerificationFailure {
        /// The record that failed verification.
        pdo_id: ArtifactId,
    },

    /// Independent reconstruction from raw inputs produced a different
    /// record. Carries the diverging field names for dispute forensics.
    #[error("replay divergence for PDO {pdo_id}: fields {diverging_fields:?}")]
    ReplayDivergence {
        /// The record that could not be reproduced.
        pdo_id: ArtifactId,
        /// Names of the fields whose recomputed values differ.
        diverging_fields: Vec<String>,
    },

    /// A closure chain link does not match its predecessor's hash.
    #[error("closure chain broken at PDO {pdo_id}")]
    ChainBroken {
        /// The record whose closure link is wrong.
        pdo_id: ArtifactId,
    },

    /// The vault holds no record under this id.
    #[error("PDO not found: {pdo_id}")]
    NotFound {
        /// The missing id.
        pdo_id: ArtifactId,
    },
}

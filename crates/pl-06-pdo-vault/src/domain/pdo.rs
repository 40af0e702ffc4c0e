//! # Immutable PDO Record
//!
//! The artifact-level immutable record. Identity is bound to a content
//! hash over every other field; the checked constructor and
//! [`ImmutablePDO::verify_integrity`] enforce that a live instance always
//! matches its hash.

use serde::{Deserialize, Serialize};
use shared_types::{
    sha256, sha256_parts, to_canonical_json, ArtifactId, Hash, Payload, Timestamp, ZERO_HASH,
};

use super::errors::PdoError;

/// Final status of the governed decision's outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// The decision was carried out as approved.
    Approved,
    /// The decision was denied.
    Denied,
    /// The outcome could not be established.
    Inconclusive,
}

/// Hash of one raw proof/decision/outcome section.
///
/// Sections are canonical-JSON encoded first so independent parties hash
/// identical bytes.
pub fn section_hash(data: &Payload) -> Hash {
    match to_canonical_json(data) {
        Ok(bytes) => sha256(&bytes),
        // A BTreeMap of JSON values always encodes; this arm is
        // unreachable but keeps the function total.
        Err(_) => ZERO_HASH,
    }
}

/// The hashed fields of a PDO, before identity binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdoFields {
    /// The record's own id.
    pub pdo_id: ArtifactId,
    /// Provenance-attestation-chain reference.
    pub pac_id: String,
    /// Wrap (decision envelope) reference.
    pub wrap_id: String,
    /// Business-event-record reference.
    pub ber_id: String,
    /// Hash of the raw proof section.
    pub proof_hash: Hash,
    /// Hash of the raw decision section.
    pub decision_hash: Hash,
    /// Hash of the raw outcome section.
    pub outcome_hash: Hash,
    /// Closure this record belongs to.
    pub closure_id: String,
    /// Hash of the previous PDO in the closure
    /// ([`ZERO_HASH`] for the first).
    pub closure_hash: Hash,
    /// When the proof section was captured (ms since epoch).
    pub proof_at: Timestamp,
    /// When the decision was taken.
    pub decision_at: Timestamp,
    /// When the outcome was observed.
    pub outcome_at: Timestamp,
    /// When the record was sealed.
    pub sealed_at: Timestamp,
    /// Final outcome status.
    pub outcome_status: OutcomeStatus,
    /// Who sealed the record.
    pub issuer: String,
    /// Version of the record layout.
    pub schema_version: u32,
}

impl PdoFields {
    /// Content hash over every field (the would-be `pdo_hash`).
    pub fn compute_hash(&self) -> Hash {
        let status = match self.outcome_status {
            OutcomeStatus::Approved => "APPROVED",
            OutcomeStatus::Denied => "DENIED",
            OutcomeStatus::Inconclusive => "INCONCLUSIVE",
        };
        sha256_parts(&[
            self.pdo_id.as_str().as_bytes(),
            self.pac_id.as_bytes(),
            self.wrap_id.as_bytes(),
            self.ber_id.as_bytes(),
            &self.proof_hash,
            &self.decision_hash,
            &self.outcome_hash,
            self.closure_id.as_bytes(),
            &self.closure_hash,
            &self.proof_at.to_le_bytes(),
            &self.decision_at.to_le_bytes(),
            &self.outcome_at.to_le_bytes(),
            &self.sealed_at.to_le_bytes(),
            status.as_bytes(),
            self.issuer.as_bytes(),
            &self.schema_version.to_le_bytes(),
        ])
    }
}

/// An immutable, hash-bound Proof-Decision-Outcome record.
///
/// Fields are private: there is no way to mutate a constructed value, and
/// no constructor that skips the hash check other than [`seal`], which
/// computes the hash itself.
///
/// [`seal`]: ImmutablePDO::seal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutablePDO {
    fields: PdoFields,
    pdo_hash: Hash,
}

impl ImmutablePDO {
    /// Construct from fields and a supplied hash.
    ///
    /// Fails closed if the supplied hash disagrees with the recomputed
    /// one; an `ImmutablePDO` can never exist in an invalid state.
    pub fn new(fields: PdoFields, pdo_hash: Hash) -> Result<Self, PdoError> {
        if fields.compute_hash() != pdo_hash {
            return Err(PdoError::HashVerificationFailure {
                pdo_id: fields.pdo_id.clone(),
            });
        }
        Ok(Self { fields, pdo_hash })
    }

    /// Seal fields, computing the hash in-process.
    pub fn seal(fields: PdoFields) -> Self {
        let pdo_hash = fields.compute_hash();
        Self { fields, pdo_hash }
    }

    /// The record's fields (read-only).
    pub fn fields(&self) -> &PdoFields {
        &self.fields
    }

    /// The record's id.
    pub fn pdo_id(&self) -> &ArtifactId {
        &self.fields.pdo_id
    }

    /// The identity-binding content hash.
    pub fn pdo_hash(&self) -> Hash {
        self.pdo_hash
    }

    /// Re-check that the stored hash matches the fields.
    ///
    /// Run on every vault read; a failure means in-memory corruption or a
    /// record deserialized from a tampered source.
    pub fn verify_integrity(&self) -> Result<(), PdoError> {
        if self.fields.compute_hash() != self.pdo_hash {
            return Err(PdoError::HashVerificationFailure {
                pdo_id: self.fields.pdo_id.clone(),
            });
        }
        Ok(())
    }
}

/// Verify the closure chain across an ordered slice of PDOs.
///
/// Each record's `closure_hash` must equal the previous record's
/// `pdo_hash`; the first must carry [`ZERO_HASH`]. Every record's own
/// integrity is checked along the way.
pub fn verify_closure_chain(pdos: &[ImmutablePDO]) -> Result<(), PdoError> {
    let mut previous_hash = ZERO_HASH;
    for pdo in pdos {
        pdo.verify_integrity()?;
        if pdo.fields().closure_hash != previous_hash {
            return Err(PdoError::ChainBroken {
                pdo_id: pdo.pdo_id().clone(),
            });
        }
        previous_hash = pdo.pdo_hash();
    }
    Ok(())
}

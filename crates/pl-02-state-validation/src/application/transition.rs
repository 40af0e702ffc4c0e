//! # Transition Validator and Proof Emitter
//!
//! Authority-gated validation. A request that passes every rule check and
//! meets the declared authority requirement yields a
//! [`StateTransitionProof`] whose content hash chains to the artifact's
//! previous proof, forming a per-artifact chain independent of the global
//! ledger chain.

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_types::{sha256, sha256_parts, ArtifactId, Hash, Timestamp};
use tracing::{debug, info};

use pl_01_state_machine::{ArtifactState, StateTransition};

use crate::domain::authority::{AuthorityGrant, AuthorityTable};
use crate::domain::errors::TransitionError;
use crate::domain::violations::{Severity, ValidationResult, Violation, ViolationType};
use crate::StateValidator;

/// Previous-proof hash of the first proof in every artifact's chain.
pub fn genesis_proof_hash() -> Hash {
    sha256(b"provenance-ledger:proof-genesis")
}

/// A cryptographically bound record that one transition was validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransitionProof {
    /// The artifact the transition belongs to.
    pub artifact_id: ArtifactId,
    /// State the artifact left.
    pub from_state: ArtifactState,
    /// State the artifact entered.
    pub to_state: ArtifactState,
    /// When the transition happened (ms since epoch).
    pub timestamp: Timestamp,
    /// Name of the authority that approved it.
    pub authority: String,
    /// Hash of the previous proof for this artifact
    /// ([`genesis_proof_hash`] for the first).
    pub previous_proof_hash: Hash,
    /// Content hash over all fields above.
    pub proof_hash: Hash,
}

impl StateTransitionProof {
    /// Recompute the content hash from the proof's own fields.
    pub fn compute_hash(&self) -> Hash {
        hash_proof_fields(
            &self.artifact_id,
            self.from_state,
            self.to_state,
            self.timestamp,
            &self.authority,
            &self.previous_proof_hash,
        )
    }

    /// Does the stored hash match the recomputed one?
    pub fn verify(&self) -> bool {
        self.proof_hash == self.compute_hash()
    }
}

fn hash_proof_fields(
    artifact_id: &ArtifactId,
    from_state: ArtifactState,
    to_state: ArtifactState,
    timestamp: Timestamp,
    authority: &str,
    previous_proof_hash: &Hash,
) -> Hash {
    sha256_parts(&[
        artifact_id.as_str().as_bytes(),
        from_state.name().as_bytes(),
        to_state.name().as_bytes(),
        &timestamp.to_le_bytes(),
        authority.as_bytes(),
        previous_proof_hash,
    ])
}

/// Emits hash-chained transition proofs. Stateless; the caller supplies
/// the previous proof hash for the artifact.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionProofEmitter;

impl TransitionProofEmitter {
    /// Emit a proof for a transition that already passed validation.
    pub fn emit(
        &self,
        transition: &StateTransition,
        previous_proof_hash: Option<Hash>,
    ) -> StateTransitionProof {
        let previous = previous_proof_hash.unwrap_or_else(genesis_proof_hash);
        let proof_hash = hash_proof_fields(
            &transition.artifact_id,
            transition.from_state,
            transition.to_state,
            transition.timestamp,
            &transition.authority,
            &previous,
        );
        StateTransitionProof {
            artifact_id: transition.artifact_id.clone(),
            from_state: transition.from_state,
            to_state: transition.to_state,
            timestamp: transition.timestamp,
            authority: transition.authority.clone(),
            previous_proof_hash: previous,
            proof_hash,
        }
    }
}

/// Verify a per-artifact proof chain.
///
/// Checks that every proof's content hash recomputes and that each
/// previous-hash link matches its predecessor. The first proof must link
/// to [`genesis_proof_hash`].
pub fn verify_chain(proofs: &[StateTransitionProof]) -> Result<(), TransitionError> {
    for (index, proof) in proofs.iter().enumerate() {
        if !proof.verify() {
            return Err(TransitionError::HashMismatch { index });
        }
        let expected_previous = if index == 0 {
            genesis_proof_hash()
        } else {
            proofs[index - 1].proof_hash
        };
        if proof.previous_proof_hash != expected_previous {
            return Err(TransitionError::ChainBroken { index });
        }
    }
    Ok(())
}

/// A fully specified transition request, as assembled by the caller from
/// the trusted live state.
#[derive(Clone, Debug)]
pub struct TransitionRequest {
    /// The proposed transition.
    pub transition: StateTransition,
    /// Trusted current state, when the caller holds it.
    pub current_state: Option<ArtifactState>,
    /// Trusted current timestamp, when the caller holds it.
    pub current_timestamp: Option<Timestamp>,
    /// Whether the artifact's lifecycle has been closed for good.
    pub is_finalized: bool,
    /// The authority making the request.
    pub requesting_authority: AuthorityGrant,
    /// Hash of the artifact's latest proof (`None` for the first).
    pub previous_proof_hash: Option<Hash>,
}

/// Authority-gated transition validation.
///
/// Wraps [`StateValidator`] with required-authority checks; on full
/// success, emits the transition proof. Fails closed: a governed
/// transition without a proof id or with insufficient authority is
/// rejected regardless of everything else.
#[derive(Clone, Debug)]
pub struct TransitionValidator {
    validator: StateValidator,
    authority_table: AuthorityTable,
    emitter: TransitionProofEmitter,
}

impl TransitionValidator {
    /// Build over a rule validator and the built-in authority table.
    pub fn new(validator: StateValidator) -> Self {
        Self::with_authority_table(validator, AuthorityTable::builtin())
    }

    /// Build with an explicit authority table.
    pub fn with_authority_table(validator: StateValidator, authority_table: AuthorityTable) -> Self {
        Self {
            validator,
            authority_table,
            emitter: TransitionProofEmitter,
        }
    }

    /// Validate a request end to end and emit its proof.
    pub fn validate_and_emit(
        &self,
        request: &TransitionRequest,
    ) -> Result<StateTransitionProof, TransitionError> {
        let transition = &request.transition;
        let mut result = self.validator.validate_transition(
            transition,
            request.current_state,
            request.current_timestamp,
            request.is_finalized,
        );

        let required = self
            .authority_table
            .required_level(transition.artifact_type, transition.to_state);

        if transition.authority.is_empty() {
            result.record(Violation::new(
                ViolationType::MissingAuthority,
                Severity::High,
                Some(transition.artifact_id.clone()),
                "transition request names no authority",
            ));
        } else if request.requesting_authority.level < required {
            result.record(
                Violation::new(
                    ViolationType::InsufficientAuthority,
                    Severity::Critical,
                    Some(transition.artifact_id.clone()),
                    "requesting authority is below the declared requirement",
                )
                .with_evidence("required_level", json!(format!("{:?}", required)))
                .with_evidence(
                    "granted_level",
                    json!(format!("{:?}", request.requesting_authority.level)),
                ),
            );
        }

        if !result.is_valid {
            debug!(
                artifact_id = %transition.artifact_id,
                violations = result.violations.len(),
                "transition request rejected"
            );
            return Err(TransitionError::Rejected { result });
        }

        let proof = self.emitter.emit(transition, request.previous_proof_hash);
        info!(
            artifact_id = %transition.artifact_id,
            from = transition.from_state.name(),
            to = transition.to_state.name(),
            "transition proof emitted"
        );
        Ok(proof)
    }
}

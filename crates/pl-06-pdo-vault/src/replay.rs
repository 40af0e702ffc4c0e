//! # PDO Replay Engine
//!
//! Independent reconstruction of a PDO from its raw proof, decision, and
//! outcome inputs. This is how a dispute process proves a historical
//! record was (or was not) honestly derived.

use shared_types::Payload;
use tracing::debug;

use crate::domain::errors::PdoError;
use crate::domain::pdo::{section_hash, ImmutablePDO};

/// Recomputes PDO hashes from raw inputs and diffs against the original.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdoReplayEngine;

impl PdoReplayEngine {
    /// Build the engine.
    pub fn new() -> Self {
        Self
    }

    /// Reproduce `original` from the raw section inputs.
    ///
    /// Recomputes the three section hashes, reassembles the would-be
    /// record hash over the original's remaining fields, and fails with a
    /// field-level diff if anything disagrees with what the original
    /// claims. Succeeds only on a bit-exact reproduction.
    pub fn replay_pdo(
        &self,
        original: &ImmutablePDO,
        proof_data: &Payload,
        decision_data: &Payload,
        outcome_data: &Payload,
    ) -> Result<(), PdoError> {
        original.verify_integrity()?;

        let fields = original.fields();
        let mut diverging_fields = Vec::new();

        let recomputed_proof = section_hash(proof_data);
        if recomputed_proof != fields.proof_hash {
            diverging_fields.push("proof_hash".to_string());
        }
        let recomputed_decision = section_hash(decision_data);
        if recomputed_decision != fields.decision_hash {
            diverging_fields.push("decision_hash".to_string());
        }
        let recomputed_outcome = section_hash(outcome_data);
        if recomputed_outcome != fields.outcome_hash {
            diverging_fields.push("outcome_hash".to_string());
        }

        // Reassemble the record hash with the recomputed sections; even
        // when every section matched, this guards the binding itself.
        let mut reconstructed = fields.clone();
        reconstructed.proof_hash = recomputed_proof;
        reconstructed.decision_hash = recomputed_decision;
        reconstructed.outcome_hash = recomputed_outcome;
        if reconstructed.compute_hash() != original.pdo_hash() && diverging_fields.is_empty() {
            diverging_fields.push("pdo_hash".to_string());
        }

        if !diverging_fields.is_empty() {
            debug!(
                pdo_id = %original.pdo_id(),
                fields = ?diverging_fields,
                "PDO replay diverged"
            );
            return Err(PdoError::ReplayDivergence {
                pdo_id: original.pdo_id().clone(),
                diverging_fields,
            });
        }
        Ok(())
    }
}

//! # Replay Result
//!
//! JSON-serializable outcome of one replay, with stable key names for the
//! audit tooling that consumes it.

use serde::{Deserialize, Serialize};
use shared_types::{hash_to_hex, Hash, Timestamp};

use pl_01_state_machine::ArtifactState;
use pl_02_state_validation::Violation;

/// Outcome of replaying one artifact's event log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayResult {
    /// True iff no validation errors occurred and every supplied
    /// expectation matched.
    pub is_deterministic: bool,
    /// The state the fold arrived at, when one was derivable.
    pub computed_state: Option<ArtifactState>,
    /// Content hash over (artifact type, id, state, last timestamp,
    /// event count, transition count).
    pub state_hash: Hash,
    /// Whether the computed hash matched the expected one
    /// (`None` when no expectation was supplied).
    pub hashes_match: Option<bool>,
    /// Whether the computed state matched the expected one
    /// (`None` when no expectation was supplied).
    pub state_matches: Option<bool>,
    /// Events folded (no-ops included).
    pub events_processed: usize,
    /// State changes applied during the fold.
    pub transitions_applied: usize,
    /// Validation findings accumulated during the replay.
    pub validation_errors: Vec<Violation>,
    /// Non-fatal findings (sequence gaps and similar).
    pub warnings: Vec<Violation>,
    /// Upper time bound of a point-in-time replay, if one was applied.
    pub as_of: Option<Timestamp>,
}

impl ReplayResult {
    /// The canonical state name, for audit output.
    pub fn computed_state_name(&self) -> Option<&'static str> {
        self.computed_state.map(|s| s.name())
    }

    /// The state hash as lowercase hex.
    pub fn state_hash_hex(&self) -> String {
        hash_to_hex(&self.state_hash)
    }
}

//! # Ledger Entities
//!
//! The sequencing record and the stored entry wrapping it. Both are
//! immutable once appended; the log only ever grows.

use serde::{Deserialize, Serialize};
use shared_types::{EntryId, Hash, Payload, Timestamp};

/// One point in the global ledger sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePoint {
    /// Position in the ledger; monotonic from a genesis of 0.
    pub sequence: u64,
    /// Hash binding (sequence, previous entry hash, payload, timestamp).
    pub entry_hash: Hash,
    /// Append timestamp (ms since epoch), non-decreasing across the log.
    pub timestamp: Timestamp,
    /// Caller-supplied identifier of the appended entry.
    pub entry_id: EntryId,
}

/// A sequence point together with the payload it committed to.
///
/// The payload is retained so an auditor can recompute the hash chain
/// without access to the original submitters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The assigned sequencing record.
    pub point: SequencePoint,
    /// The canonicalized payload the entry hash commits to.
    pub payload: Payload,
}

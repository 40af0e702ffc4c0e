//! # Sequencer Errors
//!
//! Every fail-closed condition is a distinct variant; none is ever
//! silently retried inside the core. All are fatal to the specific
//! operation, never to the ledger as a whole.

use shared_types::{CanonicalError, Timestamp};
use thiserror::Error;

/// Sequencing and chain-audit failures.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// A persisted sequence number jumps past its expected value.
    #[error("sequence gap: expected {expected}, found {found}")]
    SequenceGap {
        /// Sequence number the position demands.
        expected: u64,
        /// Sequence number actually persisted.
        found: u64,
    },

    /// A persisted sequence number moves backwards.
    #[error("sequence regression: expected {expected}, found {found}")]
    SequenceRegression {
        /// Sequence number the position demands.
        expected: u64,
        /// Sequence number actually persisted.
        found: u64,
    },

    /// An entry hash does not recompute from its predecessor and payload.
    #[error("hash chain broken at sequence {sequence}")]
    ChainBroken {
        /// Sequence of the first entry whose hash is wrong.
        sequence: u64,
    },

    /// An append carried a timestamp earlier than the cursor's.
    #[error("timestamp regression: cursor at {current}, append claimed {attempted}")]
    TimestampRegression {
        /// Timestamp the cursor currently holds.
        current: Timestamp,
        /// The rejected earlier timestamp.
        attempted: Timestamp,
    },

    /// Persisted entries are not in sequence order.
    #[error("reordering detected at log position {position}: sequence {sequence}")]
    ReorderingDetected {
        /// Zero-based position in the log.
        position: usize,
        /// Sequence number found at that position.
        sequence: u64,
    },

    /// An audit range does not exist in the log.
    #[error("range {from}..={to} out of bounds for log of {len} entries")]
    RangeOutOfBounds {
        /// Requested start position.
        from: usize,
        /// Requested end position.
        to: usize,
        /// Entries actually in the log.
        len: usize,
    },

    /// The payload could not be canonically encoded for hashing.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

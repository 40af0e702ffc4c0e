//! # PL-03 Ledger Sequencer
//!
//! Assigns every accepted entry a strictly increasing, gap-free sequence
//! number and binds it to its predecessor with a hash chain.
//!
//! ## Guarantees
//!
//! - `sequence[n] = sequence[n-1] + 1`, no gaps, never caller-supplied
//! - `entry_hash[n] = H(sequence[n] ‖ entry_hash[n-1] ‖ canonical(payload) ‖ timestamp)`
//! - `timestamp[n] ≥ timestamp[n-1]`; regressions are rejected and leave
//!   the cursor untouched
//!
//! Appends are serialized by a single mutex around the cursor
//! read-modify-write; racing callers get a total order matching
//! lock-acquisition order, which is all correctness requires. Completed
//! appends are final: there is no rollback path.
//!
//! [`LedgerSequencer::verify_sequence`] re-checks a persisted range for
//! independent audit: positions must match sequence numbers, the hash
//! chain must recompute, timestamps must not regress.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod sequencer;

pub use domain::entities::{LedgerEntry, SequencePoint};
pub use domain::errors::SequencerError;
pub use sequencer::{genesis_hash, LedgerSequencer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

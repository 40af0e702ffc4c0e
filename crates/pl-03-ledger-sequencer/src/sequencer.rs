//! # Ledger Sequencer
//!
//! The single mutable cursor of the ledger core. One mutex serializes the
//! check-compute-commit of every append; everything else in the workspace
//! is a pure function over immutable inputs.

use parking_lot::Mutex;
use shared_types::{sha256, sha256_parts, to_canonical_json, EntryId, Hash, Payload, Timestamp};
use tracing::{debug, info};

use crate::domain::entities::{LedgerEntry, SequencePoint};
use crate::domain::errors::SequencerError;

/// Hash of the ledger's genesis cursor (sequence 0).
pub fn genesis_hash() -> Hash {
    sha256(b"provenance-ledger:genesis")
}

struct Cursor {
    sequence: u64,
    hash: Hash,
    timestamp: Timestamp,
}

struct Inner {
    cursor: Cursor,
    log: Vec<LedgerEntry>,
}

/// Gap-free monotonic sequencer with a hash-chained append-only log.
///
/// Callers never supply sequence numbers; the sequencer assigns
/// `cursor + 1` under the lock, which rules out gaps and reordering by
/// construction.
pub struct LedgerSequencer {
    inner: Mutex<Inner>,
}

impl LedgerSequencer {
    /// A sequencer at genesis: cursor (0, genesis hash, `genesis_timestamp`).
    pub fn new(genesis_timestamp: Timestamp) -> Self {
        Self {
            inner: Mutex::new(Inner {
                cursor: Cursor {
                    sequence: 0,
                    hash: genesis_hash(),
                    timestamp: genesis_timestamp,
                },
                log: Vec::new(),
            }),
        }
    }

    /// Append an entry, assigning the next sequence number.
    ///
    /// Fails with [`SequencerError::TimestampRegression`] if `timestamp`
    /// is earlier than the cursor's; the cursor is left untouched on any
    /// failure. Equal timestamps are allowed (multiple appends within one
    /// clock tick).
    pub fn append(
        &self,
        entry_id: EntryId,
        payload: Payload,
        timestamp: Timestamp,
    ) -> Result<SequencePoint, SequencerError> {
        let mut inner = self.inner.lock();

        if timestamp < inner.cursor.timestamp {
            debug!(
                entry_id = %entry_id,
                cursor_timestamp = inner.cursor.timestamp,
                attempted = timestamp,
                "append rejected: timestamp regression"
            );
            return Err(SequencerError::TimestampRegression {
                current: inner.cursor.timestamp,
                attempted: timestamp,
            });
        }

        // Canonicalize before touching the cursor so an encoding failure
        // leaves the ledger unchanged.
        let canonical = to_canonical_json(&payload)?;

        let next_sequence = inner.cursor.sequence + 1;
        let entry_hash = chain_hash(next_sequence, &inner.cursor.hash, &canonical, timestamp);

        let point = SequencePoint {
            sequence: next_sequence,
            entry_hash,
            timestamp,
            entry_id,
        };

        inner.cursor = Cursor {
            sequence: next_sequence,
            hash: entry_hash,
            timestamp,
        };
        inner.log.push(LedgerEntry {
            point: point.clone(),
            payload,
        });

        info!(sequence = next_sequence, "ledger entry appended");
        Ok(point)
    }

    /// Current cursor as a (sequence, hash, timestamp) snapshot.
    pub fn cursor(&self) -> (u64, Hash, Timestamp) {
        let inner = self.inner.lock();
        (
            inner.cursor.sequence,
            inner.cursor.hash,
            inner.cursor.timestamp,
        )
    }

    /// Number of appended entries (genesis excluded).
    pub fn len(&self) -> usize {
        self.inner.lock().log.len()
    }

    /// Has anything been appended yet?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the whole log.
    pub fn log(&self) -> Vec<LedgerEntry> {
        self.inner.lock().log.clone()
    }

    /// Entry hashes in log order, for Merkle indexing.
    pub fn entry_hashes(&self) -> Vec<Hash> {
        self.inner
            .lock()
            .log
            .iter()
            .map(|e| e.point.entry_hash)
            .collect()
    }

    /// Audit a range of the persisted log (inclusive, zero-based
    /// positions).
    ///
    /// Re-checks that sequence numbers exactly match their positions (no
    /// gaps, no reordering), that every entry hash recomputes from its
    /// predecessor, and that timestamps never regress. Independent of the
    /// cursor: this walks only persisted data.
    pub fn verify_sequence(&self, from: usize, to: usize) -> Result<(), SequencerError> {
        let inner = self.inner.lock();
        let log = &inner.log;

        if from > to || to >= log.len() {
            return Err(SequencerError::RangeOutOfBounds {
                from,
                to,
                len: log.len(),
            });
        }

        for position in from..=to {
            let entry = &log[position];
            let expected = position as u64 + 1;
            let found = entry.point.sequence;

            if found > expected {
                return Err(SequencerError::SequenceGap { expected, found });
            }
            if found < expected {
                return Err(SequencerError::SequenceRegression { expected, found });
            }

            let previous_hash = if position == 0 {
                genesis_hash()
            } else {
                log[position - 1].point.entry_hash
            };
            let canonical = to_canonical_json(&entry.payload)?;
            let recomputed = chain_hash(found, &previous_hash, &canonical, entry.point.timestamp);
            if recomputed != entry.point.entry_hash {
                return Err(SequencerError::ChainBroken { sequence: found });
            }

            if position > 0 && entry.point.timestamp < log[position - 1].point.timestamp {
                return Err(SequencerError::ReorderingDetected {
                    position,
                    sequence: found,
                });
            }
        }
        Ok(())
    }
}

fn chain_hash(
    sequence: u64,
    previous_hash: &Hash,
    canonical_payload: &[u8],
    timestamp: Timestamp,
) -> Hash {
    sha256_parts(&[
        &sequence.to_le_bytes(),
        previous_hash,
        canonical_payload,
        &timestamp.to_le_bytes(),
    ])
}

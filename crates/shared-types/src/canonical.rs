//! # Canonical Payload Encoding
//!
//! Deterministic JSON encoding for hash inputs. Payloads are
//! `BTreeMap<String, Value>` so key order is sorted, and serde_json renders
//! sorted maps identically on every run and platform. Any value that hashes
//! into a ledger entry or a PDO section goes through this module.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Free-form payload attached to a ledger entry or PDO section.
///
/// BTreeMap keeps keys sorted, which makes the canonical encoding stable.
pub type Payload = BTreeMap<String, serde_json::Value>;

/// Canonical encoding failure.
#[derive(Debug, Error)]
pub enum CanonicalError {
    /// The value could not be rendered as JSON (non-string map keys,
    /// non-finite floats, and similar).
    #[error("canonical encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Encode a value as canonical JSON bytes.
///
/// Structs encode their fields in declaration order; `Payload` maps encode
/// keys in sorted order. The result is byte-identical across invocations,
/// which is what makes entry hashes recomputable by an independent auditor.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    Ok(serde_json::to_vec(value)?)
}

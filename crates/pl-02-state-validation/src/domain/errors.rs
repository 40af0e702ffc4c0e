//! # Validation Errors
//!
//! Error type for the authority-gated transition path. The pure
//! [`StateValidator`](crate::StateValidator) reports findings through
//! `ValidationResult` instead and never errors.

use thiserror::Error;

use super::violations::ValidationResult;

/// Failure of an authority-gated transition request.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// One or more invariants were violated; the full findings are
    /// attached so the caller can log or escalate them.
    #[error("transition rejected with {} violation(s)", result.violations.len())]
    Rejected {
        /// The findings that caused the rejection.
        result: ValidationResult,
    },

    /// A proof chain link does not match its predecessor's hash.
    #[error("proof chain broken at index {index}")]
    ChainBroken {
        /// Index of the first proof whose previous-hash link is wrong.
        index: usize,
    },

    /// A proof's content hash does not recompute from its fields.
    #[error("proof hash mismatch at index {index}")]
    HashMismatch {
        /// Index of the proof whose hash is wrong.
        index: usize,
    },
}

impl TransitionError {
    /// The validation findings, when this error carries them.
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            TransitionError::Rejected { result } => Some(result),
            _ => None,
        }
    }
}

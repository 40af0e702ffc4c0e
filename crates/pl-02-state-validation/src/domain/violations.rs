//! # Violation Model
//!
//! Structured, severity-graded findings produced by the validators. Every
//! violation carries a generated unique id, a detection timestamp, the
//! artifact it concerns, and a free-form evidence map for forensics.

use serde::{Deserialize, Serialize};
use shared_types::{ArtifactId, Payload, Timestamp};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use pl_01_state_machine::ArtifactState;

/// Severity of a validation finding.
///
/// CRITICAL findings should be treated as fatal by the governing caller;
/// lower severities may be logged and waived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational; no governance action required.
    Low,
    /// Worth recording; the caller may proceed with a waiver.
    Medium,
    /// A rule was broken; the transition should not proceed unamended.
    High,
    /// An integrity invariant was violated; the operation must be blocked.
    Critical,
}

/// The closed set of invariant violations the validators can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    /// Transition attempted on a finalized artifact.
    FinalityViolation,
    /// Transition timestamp does not move time forward.
    BackwardTransition,
    /// Governed transition lacks a backing proof id.
    MissingProof,
    /// Claimed from-state disagrees with the trusted current state.
    ConflictingTruth,
    /// (from, to) pair is not in the declared transition table.
    InvalidTransition,
    /// Event timestamps regress across the sequence order.
    TemporalViolation,
    /// Gap in event sequence numbers (warning unless configured fatal).
    SequenceGap,
    /// More than one current-state record for one artifact.
    DuplicateState,
    /// Artifact has no parent reference and is not marked genesis.
    OrphanArtifact,
    /// No authority entry accompanies a governed transition.
    MissingAuthority,
    /// The requesting authority is below the declared requirement.
    InsufficientAuthority,
    /// No initial state is derivable from the first replayed event.
    UnderivableInitialState,
    /// Replayed final state differs from the expected final state.
    StateMismatch,
    /// Replayed state hash differs from the expected hash.
    HashMismatch,
}

/// One validation finding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Violation {
    /// Generated unique id for forensics cross-referencing.
    pub violation_id: Uuid,
    /// Which invariant was violated.
    pub violation_type: ViolationType,
    /// How bad it is.
    pub severity: Severity,
    /// The artifact concerned, when known.
    pub artifact_id: Option<ArtifactId>,
    /// When the violation was detected (ms since epoch).
    pub detected_at: Timestamp,
    /// Human-readable summary.
    pub description: String,
    /// Free-form evidence for forensics (claimed vs actual values, etc.).
    pub evidence: Payload,
}

impl Violation {
    /// Build a violation detected now.
    pub fn new(
        violation_type: ViolationType,
        severity: Severity,
        artifact_id: Option<ArtifactId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            violation_id: Uuid::new_v4(),
            violation_type,
            severity,
            artifact_id,
            detected_at: now_ms(),
            description: description.into(),
            evidence: Payload::new(),
        }
    }

    /// Attach one evidence entry.
    pub fn with_evidence(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.evidence.insert(key.into(), value);
        self
    }
}

/// Outcome of one validation operation.
///
/// `is_valid` is false iff any non-warning violation was recorded; the
/// validator itself never halts execution.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no violations were recorded.
    pub is_valid: bool,
    /// Violations that make the operation invalid.
    pub violations: Vec<Violation>,
    /// Non-fatal findings (sequence gaps and similar).
    pub warnings: Vec<Violation>,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a violation and mark the result invalid.
    pub fn record(&mut self, violation: Violation) {
        self.is_valid = false;
        self.violations.push(violation);
    }

    /// Record a non-fatal warning; validity is unaffected.
    pub fn warn(&mut self, violation: Violation) {
        self.warnings.push(violation);
    }

    /// Does the result carry any CRITICAL violation?
    pub fn has_critical(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Critical)
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid = self.is_valid && other.is_valid;
        self.violations.extend(other.violations);
        self.warnings.extend(other.warnings);
    }
}

/// A live "this is the artifact's current state" record, as held by the
/// trusted state store. Used by the duplicate-state check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStateRecord {
    /// The artifact this record is about.
    pub artifact_id: ArtifactId,
    /// The state the store claims is current.
    pub state: ArtifactState,
    /// When the record was written (ms since epoch).
    pub recorded_at: Timestamp,
}

/// Current wall-clock time in ms since epoch.
pub(crate) fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

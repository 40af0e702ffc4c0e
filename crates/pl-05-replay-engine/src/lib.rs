//! # PL-05 State Replay Engine
//!
//! Deterministically recomputes an artifact's lifecycle state from an
//! ordered event log, independent of the live state, and reports whether
//! the result matches expectation. This is the mechanism any party uses to
//! prove the live state has not drifted from the event record.
//!
//! ## Determinism
//!
//! The same event slice yields the same `state_hash`, `computed_state`,
//! and `is_deterministic` on every invocation, on every machine. The fold
//! itself mutates no shared state; only the diagnostic [`Violation`]s on
//! error paths carry fresh ids and detection timestamps.
//!
//! [`Violation`]: pl_02_state_validation::Violation
//!
//! [`StateReplayEngine::compute_state_at_time`] runs the same fold
//! restricted to events at or before a target time, for dispute and
//! point-in-time queries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod result;

pub use engine::StateReplayEngine;
pub use result::ReplayResult;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Validator Configuration

use serde::{Deserialize, Serialize};

/// Configuration for the validators.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Treat event sequence-number gaps as HIGH violations instead of
    /// warnings. Off by default: a gap usually means events are still in
    /// flight, not that the log was tampered with.
    pub gaps_are_violations: bool,

    /// Require a backing proof id on every validated transition.
    /// On by default; disable only for replaying pre-governance history.
    pub require_proof: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            gaps_are_violations: false,
            require_proof: true,
        }
    }
}

impl ValidatorConfig {
    /// Config for tests: same defaults, named for call-site clarity.
    pub fn for_testing() -> Self {
        Self::default()
    }
}

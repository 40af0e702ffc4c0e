//! # Vault Configuration

use serde::{Deserialize, Serialize};

/// Configuration for the vault.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Upper bound on stored records. `None` (the default) means
    /// unbounded; embedders with a fixed storage budget set a limit and
    /// rotate closures before it is reached.
    pub max_records: Option<usize>,

    /// Record every store/read/verify in the access log. On by default;
    /// disable only for bulk backfills where the importer keeps its own
    /// audit trail.
    pub log_access: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            max_records: None,
            log_access: true,
        }
    }
}

impl VaultConfig {
    /// Config for tests: same defaults, named for call-site clarity.
    pub fn for_testing() -> Self {
        Self::default()
    }

    /// Config with a record capacity.
    pub fn with_capacity(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
            ..Self::default()
        }
    }
}

//! # PDO Vault
//!
//! Append-only, mutex-guarded storage keyed by PDO id, with integrity
//! verification on every read and an access log for audit.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{ArtifactId, Timestamp};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::VaultConfig;
use crate::domain::errors::PdoError;
use crate::domain::pdo::ImmutablePDO;

/// What an access-log entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessOperation {
    /// A record was stored.
    Store,
    /// A record was read (and integrity-verified).
    Read,
    /// A record was verified during a sweep.
    Verify,
}

/// One entry of the vault's append-only access log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Generated unique id of the log entry.
    pub record_id: Uuid,
    /// The PDO concerned.
    pub pdo_id: ArtifactId,
    /// What happened.
    pub operation: AccessOperation,
    /// When (ms since epoch).
    pub timestamp: Timestamp,
}

struct Inner {
    records: HashMap<ArtifactId, ImmutablePDO>,
    access_log: Vec<AccessRecord>,
}

/// Append-only vault of immutable PDO records.
///
/// The id → record map and its access log are the only mutable state;
/// one mutex serializes the check-then-commit of every store.
pub struct PdoVault {
    inner: Mutex<Inner>,
    config: VaultConfig,
}

impl PdoVault {
    /// An empty vault with the default configuration.
    pub fn new() -> Self {
        Self::with_config(VaultConfig::default())
    }

    /// An empty vault with an explicit configuration.
    pub fn with_config(config: VaultConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: HashMap::new(),
                access_log: Vec::new(),
            }),
            config,
        }
    }

    /// Store a record under its own id.
    ///
    /// Fails closed if the id already exists: an overwrite of an
    /// immutable record is a mutation attempt, not an update. The
    /// record's integrity is verified before it is admitted, and a
    /// configured record capacity is enforced.
    pub fn store(&self, pdo: ImmutablePDO) -> Result<(), PdoError> {
        pdo.verify_integrity()?;

        let mut inner = self.inner.lock();
        let pdo_id = pdo.pdo_id().clone();
        if inner.records.contains_key(&pdo_id) {
            warn!(pdo_id = %pdo_id, "store rejected: id already exists");
            return Err(PdoError::MutationAttempt { pdo_id });
        }
        if let Some(limit) = self.config.max_records {
            if inner.records.len() >= limit {
                warn!(pdo_id = %pdo_id, limit, "store rejected: vault at capacity");
                return Err(PdoError::CapacityExceeded { limit });
            }
        }

        inner.records.insert(pdo_id.clone(), pdo);
        self.log_access(&mut inner, pdo_id.clone(), AccessOperation::Store);
        info!(pdo_id = %pdo_id, "PDO stored");
        Ok(())
    }

    /// Read a record, verifying its integrity first.
    pub fn get(&self, pdo_id: &ArtifactId) -> Result<ImmutablePDO, PdoError> {
        let mut inner = self.inner.lock();
        let pdo = inner
            .records
            .get(pdo_id)
            .cloned()
            .ok_or_else(|| PdoError::NotFound {
                pdo_id: pdo_id.clone(),
            })?;
        pdo.verify_integrity()?;
        self.log_access(&mut inner, pdo_id.clone(), AccessOperation::Read);
        Ok(pdo)
    }

    /// Does the vault hold this id?
    pub fn contains(&self, pdo_id: &ArtifactId) -> bool {
        self.inner.lock().records.contains_key(pdo_id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// Is the vault empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integrity-check every stored record; returns the count verified.
    ///
    /// Stops at the first failure so the offending id is reported.
    pub fn verify_all(&self) -> Result<usize, PdoError> {
        let mut inner = self.inner.lock();
        let ids: Vec<ArtifactId> = inner.records.keys().cloned().collect();
        for pdo_id in &ids {
            inner.records[pdo_id].verify_integrity()?;
            self.log_access(&mut inner, pdo_id.clone(), AccessOperation::Verify);
        }
        Ok(ids.len())
    }

    /// Snapshot of the access log.
    pub fn access_log(&self) -> Vec<AccessRecord> {
        self.inner.lock().access_log.clone()
    }

    fn log_access(&self, inner: &mut Inner, pdo_id: ArtifactId, operation: AccessOperation) {
        if !self.config.log_access {
            return;
        }
        inner.access_log.push(AccessRecord {
            record_id: Uuid::new_v4(),
            pdo_id,
            operation,
            timestamp: now_ms(),
        });
    }
}

impl Default for PdoVault {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

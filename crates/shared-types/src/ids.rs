//! # Identifier Newtypes
//!
//! Opaque string identifiers for artifacts, events, proofs, and ledger
//! entries. Newtypes keep the id spaces from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in milliseconds since epoch.
pub type Timestamp = u64;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id! {
    /// Identifier of a governed artifact (shipment, settlement, PDO, ...).
    ArtifactId
}

string_id! {
    /// Identifier of a lifecycle event consumed from the event source.
    EventId
}

string_id! {
    /// Identifier of a governance proof backing a transition.
    ProofId
}

string_id! {
    /// Identifier of an entry appended to the ledger.
    EntryId
}

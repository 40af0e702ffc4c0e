//! # Provenance-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Cross-subsystem lifecycle flows
//! │   ├── lifecycle_scenarios.rs
//! │   └── e2e_flow.rs
//! │
//! └── properties/       # Property tests per subsystem
//!     ├── pl_02_proof_chain.rs
//!     ├── pl_03_sequencer.rs
//!     └── ...
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pl-tests
//!
//! # By category
//! cargo test -p pl-tests integration::
//! cargo test -p pl-tests properties::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod properties;

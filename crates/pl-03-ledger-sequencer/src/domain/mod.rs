//! Domain layer: ledger entries and sequencer errors.

pub mod entities;
pub mod errors;

//! Property tests per subsystem.

pub mod pl_02_proof_chain;
pub mod pl_04_merkle;
pub mod pl_05_replay;
pub mod pl_06_pdo;

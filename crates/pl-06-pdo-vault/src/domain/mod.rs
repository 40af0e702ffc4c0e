//! Domain layer: the immutable PDO record and its errors.

pub mod errors;
pub mod pdo;

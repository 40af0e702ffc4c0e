//! Domain layer: violation model, authority model, errors.

pub mod authority;
pub mod errors;
pub mod violations;

//! Application layer: the pure rule checker and the authority-gated
//! transition validator.

pub mod transition;
pub mod validator;

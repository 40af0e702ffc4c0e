//! Domain layer: state enums, schema, event mapping, entities.

pub mod entities;
pub mod events;
pub mod schema;
pub mod states;

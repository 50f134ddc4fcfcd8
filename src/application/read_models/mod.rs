//! Read models - flattened, serializable snapshots of a view's value
//!
//! Formatters only ever see these, never the live entities.

mod relationship_read_model;

pub use relationship_read_model::{EntityView, RelationshipReadModel, ValueView};

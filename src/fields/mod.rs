//! Relationship field descriptors

pub mod filter;
pub mod relation;

pub use filter::Filter;
pub use relation::{Cardinality, Relation, RelationKind};

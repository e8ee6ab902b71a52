//! Error types for the relationship-mutation engine
//!
//! Every failure the engine can produce is a distinct, matchable variant;
//! storage failures propagate unmodified from the persistence collaborator.

use thiserror::Error;

use crate::identifier::ResourceIdentifier;
use crate::store::StoreError;

/// Result type alias for engine operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Errors surfaced by schema lookup, mutation, and eager loading
#[derive(Debug, Error)]
pub enum OrmError {
    /// No schema is registered under the given resource type name
    #[error("resource type '{0}' is not registered")]
    UnknownResourceType(String),

    /// The schema has no relationship field with the given name
    #[error("resource type '{resource_type}' has no relationship named '{relation}'")]
    UnknownRelationship {
        resource_type: String,
        relation: String,
    },

    /// A to-one mutator was requested for a collection-valued relation
    #[error("relationship '{relation}' on '{resource_type}' is not a to-one relation")]
    NotAToOneRelation {
        resource_type: String,
        relation: String,
    },

    /// A to-many mutator was requested for a single-valued relation
    #[error("relationship '{relation}' on '{resource_type}' is not a to-many relation")]
    NotAToManyRelation {
        resource_type: String,
        relation: String,
    },

    /// A resource identifier supplied to a mutation does not name a stored
    /// record of the relation's inverse type
    #[error("related record '{0}' does not exist")]
    RelatedRecordNotFound(ResourceIdentifier),

    /// An include path traverses a relation marked as not eager-loadable
    #[error("relationship '{relation}' on '{resource_type}' cannot be eager loaded")]
    RelationNotIncludable {
        resource_type: String,
        relation: String,
    },

    /// Failure reported by the persistence collaborator, passed through
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Persistence collaborator contract
//!
//! The engine owns no storage. Everything it reads or writes goes through
//! [`ModelStore`], whose implementation is expected to run each mutator
//! invocation inside one ambient transaction scope.

pub mod memory;

use thiserror::Error;

use crate::identifier::ResourceIdentifier;
use crate::model::Model;

pub use memory::MemoryStore;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the persistence collaborator.
///
/// The engine passes these through unmodified and never retries; rollback of
/// partial writes is the collaborator's ambient transaction's job.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A storage constraint was violated
    #[error("storage constraint violated: {0}")]
    Constraint(String),

    /// The backend failed (connectivity, I/O, ...)
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// The storage operations the mutation engine requires.
///
/// `save` persists a record's attributes and owner back-reference only;
/// in-memory relation state never reaches storage. `owned_by` must return
/// records in ascending primary-key order — mutators rely on that as the
/// stable result ordering.
pub trait ModelStore {
    /// Fetch the record named by `identifier`, if it exists
    fn find(&self, identifier: &ResourceIdentifier) -> StoreResult<Option<Model>>;

    /// All records of `resource_type` whose owner back-reference is `owner`,
    /// in ascending primary-key order
    fn owned_by(
        &self,
        owner: &ResourceIdentifier,
        resource_type: &str,
    ) -> StoreResult<Vec<Model>>;

    /// Persist the record's current attribute and owner state
    fn save(&mut self, model: &Model) -> StoreResult<()>;

    /// Permanently remove the record; removing a missing record is a no-op
    fn delete(&mut self, identifier: &ResourceIdentifier) -> StoreResult<()>;
}

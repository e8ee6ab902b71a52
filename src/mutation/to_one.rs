//! To-one mutator: `associate` semantics

use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::fields::Relation;
use crate::identifier::ResourceIdentifier;
use crate::loading::{EagerLoader, IncludePaths};
use crate::model::Model;
use crate::schema::SchemaRegistry;
use crate::store::ModelStore;

use super::effective_include_paths;

/// Executes `associate` for one single-valued relation on one parent record.
///
/// Obtained from [`Repository::modify_to_one`](crate::repository::Repository::modify_to_one).
pub struct ToOneMutator<'a, S: ModelStore> {
    pub(crate) registry: &'a SchemaRegistry,
    pub(crate) relation: &'a Relation,
    pub(crate) parent: &'a mut Model,
    pub(crate) store: &'a mut S,
    pub(crate) include: IncludePaths,
}

impl<'a, S: ModelStore> ToOneMutator<'a, S> {
    /// Request eager loading of the given paths on the returned record
    pub fn with(mut self, paths: impl Into<IncludePaths>) -> Self {
        self.include.extend(paths.into());
        self
    }

    /// Associate the identified record, or clear the relation with `None`.
    ///
    /// A previously associated record that differs from the new target has
    /// its owner back-reference cleared — or is deleted outright when the
    /// field's force-delete policy is set. The parent's relation is marked
    /// loaded with the result either way.
    pub fn associate(self, target: Option<&ResourceIdentifier>) -> OrmResult<Option<Model>> {
        let parent_id = self.parent.identifier();
        let inverse = self.relation.inverse();

        let mut next = match target {
            Some(identifier) => Some(resolve(self.store, identifier, &inverse)?),
            None => None,
        };

        // Detach whatever the parent currently owns, unless it is the new
        // target itself.
        let current = self
            .store
            .owned_by(&parent_id, &inverse)?
            .into_iter()
            .next();
        if let Some(mut previous) = current {
            let unchanged = next.as_ref().is_some_and(|record| record.is(&previous));
            if !unchanged {
                if self.relation.force_delete_on_detach() {
                    debug!(record = %previous.identifier(), "force deleting detached record");
                    self.store.delete(&previous.identifier())?;
                } else {
                    debug!(record = %previous.identifier(), "clearing owner of detached record");
                    previous.set_owner(None);
                    self.store.save(&previous)?;
                }
            }
        }

        if let Some(record) = next.as_mut() {
            // Re-associating the already-owned record writes nothing.
            if record.owner() != Some(&parent_id) {
                record.set_owner(Some(parent_id.clone()));
                self.store.save(record)?;
                debug!(parent = %parent_id, record = %record.identifier(), "associated record");
            }

            let paths =
                effective_include_paths(self.registry, &self.include, record.resource_type())?;
            EagerLoader::new(self.registry).load(&*self.store, record, &paths)?;
        }

        self.parent
            .set_related_one(self.relation.name().to_string(), next.clone());
        Ok(next)
    }
}

/// Resolve an identifier against the relation's inverse type
fn resolve<S: ModelStore>(
    store: &S,
    identifier: &ResourceIdentifier,
    inverse: &str,
) -> OrmResult<Model> {
    if identifier.resource_type != inverse {
        return Err(OrmError::RelatedRecordNotFound(identifier.clone()));
    }
    store
        .find(identifier)?
        .ok_or_else(|| OrmError::RelatedRecordNotFound(identifier.clone()))
}

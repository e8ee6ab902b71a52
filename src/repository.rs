//! Repository: entry point for relationship mutations

use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::loading::IncludePaths;
use crate::model::Model;
use crate::mutation::{ToManyMutator, ToOneMutator};
use crate::schema::{Schema, SchemaRegistry};
use crate::store::ModelStore;

/// Mutation entry point for one resource type.
///
/// Borrows the registry, the parent schema, and the store for the duration
/// of a request; obtained via
/// [`SchemaRegistry::repository`](crate::schema::SchemaRegistry::repository).
pub struct Repository<'a, S: ModelStore> {
    registry: &'a SchemaRegistry,
    schema: &'a Schema,
    store: &'a mut S,
}

impl<'a, S: ModelStore> Repository<'a, S> {
    pub(crate) fn new(
        registry: &'a SchemaRegistry,
        schema: &'a Schema,
        store: &'a mut S,
    ) -> Self {
        Self {
            registry,
            schema,
            store,
        }
    }

    /// The schema this repository mutates
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// A mutator for a single-valued relation on `parent`.
    ///
    /// Fails with [`OrmError::UnknownRelationship`] for an unknown field and
    /// [`OrmError::NotAToOneRelation`] for a collection-valued one.
    pub fn modify_to_one<'p>(
        &'p mut self,
        parent: &'p mut Model,
        relation_name: &str,
    ) -> OrmResult<ToOneMutator<'p, S>> {
        let relation = self.schema.relationship(relation_name)?;
        if !relation.to_one() {
            return Err(OrmError::NotAToOneRelation {
                resource_type: self.schema.resource_type().to_string(),
                relation: relation_name.to_string(),
            });
        }

        debug!(parent = %parent.identifier(), relation = %relation_name, "to-one mutator");
        Ok(ToOneMutator {
            registry: self.registry,
            relation,
            parent,
            store: &mut *self.store,
            include: IncludePaths::new(),
        })
    }

    /// A mutator for a collection-valued relation on `parent`.
    ///
    /// Fails with [`OrmError::UnknownRelationship`] for an unknown field and
    /// [`OrmError::NotAToManyRelation`] for a single-valued one.
    pub fn modify_to_many<'p>(
        &'p mut self,
        parent: &'p mut Model,
        relation_name: &str,
    ) -> OrmResult<ToManyMutator<'p, S>> {
        let relation = self.schema.relationship(relation_name)?;
        if !relation.to_many() {
            return Err(OrmError::NotAToManyRelation {
                resource_type: self.schema.resource_type().to_string(),
                relation: relation_name.to_string(),
            });
        }

        debug!(parent = %parent.identifier(), relation = %relation_name, "to-many mutator");
        Ok(ToManyMutator {
            registry: self.registry,
            relation,
            parent,
            store: &mut *self.store,
            include: IncludePaths::new(),
        })
    }
}

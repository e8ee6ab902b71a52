//! Resource schemas and the schema registry

use std::collections::HashMap;

use crate::error::{OrmError, OrmResult};
use crate::fields::Relation;
use crate::loading::IncludePaths;
use crate::repository::Repository;
use crate::store::ModelStore;

/// The relationship fields and eager-load defaults of one resource type
#[derive(Debug, Clone)]
pub struct Schema {
    resource_type: String,
    relations: HashMap<String, Relation>,
    default_include_paths: IncludePaths,
}

impl Schema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            relations: HashMap::new(),
            default_include_paths: IncludePaths::new(),
        }
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Register a relationship field, returning the exclusive handle used
    /// for fluent configuration
    pub fn add_relation(&mut self, relation: Relation) -> &mut Relation {
        let name = relation.name().to_string();
        self.relations.entry(name).or_insert(relation)
    }

    /// Look up a relationship field by its exposed name
    pub fn relationship(&self, name: &str) -> OrmResult<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| OrmError::UnknownRelationship {
                resource_type: self.resource_type.clone(),
                relation: name.to_string(),
            })
    }

    /// Mutable relationship lookup for late policy changes
    pub fn relationship_mut(&mut self, name: &str) -> OrmResult<&mut Relation> {
        match self.relations.get_mut(name) {
            Some(relation) => Ok(relation),
            None => Err(OrmError::UnknownRelationship {
                resource_type: self.resource_type.clone(),
                relation: name.to_string(),
            }),
        }
    }

    pub fn has_relationship(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Set the include paths applied by default to records of this type
    /// returned from mutations
    pub fn default_include(&mut self, paths: impl Into<IncludePaths>) -> &mut Self {
        self.default_include_paths = paths.into();
        self
    }

    pub fn default_include_paths(&self) -> &IncludePaths {
        &self.default_include_paths
    }
}

/// Resolves resource type names to schemas and repositories.
///
/// Built exclusively during application setup, then shared immutably for
/// the lifetime of the request.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, returning a handle for further configuration
    pub fn register(&mut self, schema: Schema) -> &mut Schema {
        let resource_type = schema.resource_type().to_string();
        self.schemas.entry(resource_type).or_insert(schema)
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.schemas.contains_key(resource_type)
    }

    /// Resolve a resource type name to its schema
    pub fn schema_for(&self, resource_type: &str) -> OrmResult<&Schema> {
        self.schemas
            .get(resource_type)
            .ok_or_else(|| OrmError::UnknownResourceType(resource_type.to_string()))
    }

    /// Mutable schema lookup for late configuration
    pub fn schema_for_mut(&mut self, resource_type: &str) -> OrmResult<&mut Schema> {
        match self.schemas.get_mut(resource_type) {
            Some(schema) => Ok(schema),
            None => Err(OrmError::UnknownResourceType(resource_type.to_string())),
        }
    }

    /// Build a repository for the given resource type over `store`
    pub fn repository<'a, S: ModelStore>(
        &'a self,
        resource_type: &str,
        store: &'a mut S,
    ) -> OrmResult<Repository<'a, S>> {
        let schema = self.schema_for(resource_type)?;
        Ok(Repository::new(self, schema, store))
    }
}

//! Include paths and the eager-load planner

use std::fmt;

use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::fields::{Relation, RelationKind};
use crate::model::{Model, RelationValue};
use crate::schema::SchemaRegistry;
use crate::store::ModelStore;

/// A dot-delimited relationship path, e.g. `"imageable"` or `"author.country"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludePath {
    segments: Vec<String>,
}

impl IncludePath {
    /// Parse a dot-delimited path; empty segments are discarded
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for IncludePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for IncludePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// An ordered collection of include paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePaths(Vec<IncludePath>);

impl IncludePaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncludePath> {
        self.0.iter()
    }

    pub fn push(&mut self, path: IncludePath) {
        self.0.push(path);
    }

    /// Append every path from `other`
    pub fn extend(&mut self, other: IncludePaths) {
        self.0.extend(other.0);
    }
}

impl From<&str> for IncludePaths {
    fn from(path: &str) -> Self {
        Self(vec![IncludePath::parse(path)])
    }
}

impl<const N: usize> From<[&str; N]> for IncludePaths {
    fn from(paths: [&str; N]) -> Self {
        Self(paths.into_iter().map(IncludePath::parse).collect())
    }
}

impl From<Vec<&str>> for IncludePaths {
    fn from(paths: Vec<&str>) -> Self {
        Self(paths.into_iter().map(IncludePath::parse).collect())
    }
}

impl From<IncludePath> for IncludePaths {
    fn from(path: IncludePath) -> Self {
        Self(vec![path])
    }
}

impl FromIterator<IncludePath> for IncludePaths {
    fn from_iter<I: IntoIterator<Item = IncludePath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Loads requested relation paths onto record graphs.
///
/// Loading is idempotent per segment: an already-loaded relation is left
/// untouched, and nested segments recurse into whatever value is loaded.
pub struct EagerLoader<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> EagerLoader<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Load every path in `paths` onto `model`, fetching through `store`
    pub fn load(
        &self,
        store: &dyn ModelStore,
        model: &mut Model,
        paths: &IncludePaths,
    ) -> OrmResult<()> {
        for path in paths.iter() {
            self.load_segments(store, model, path.segments())?;
        }
        Ok(())
    }

    fn load_segments(
        &self,
        store: &dyn ModelStore,
        model: &mut Model,
        segments: &[String],
    ) -> OrmResult<()> {
        let Some((head, rest)) = segments.split_first() else {
            return Ok(());
        };

        let schema = self.registry.schema_for(model.resource_type())?;
        let relation = schema.relationship(head)?;

        if !relation.is_include_path() {
            return Err(OrmError::RelationNotIncludable {
                resource_type: schema.resource_type().to_string(),
                relation: head.clone(),
            });
        }

        if !model.relation_loaded(head) {
            let value = self.fetch(store, model, relation)?;
            debug!(record = %model.identifier(), relation = %head, "eager loaded relation");
            model.set_relation(head.clone(), value);
        }

        if rest.is_empty() {
            return Ok(());
        }

        if let Some(value) = model.relation_mut(head) {
            match value {
                RelationValue::One(Some(child)) => self.load_segments(store, &mut **child, rest)?,
                RelationValue::One(None) => {}
                RelationValue::Many(children) => {
                    for child in children.iter_mut() {
                        self.load_segments(store, child, rest)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn fetch(
        &self,
        store: &dyn ModelStore,
        model: &Model,
        relation: &Relation,
    ) -> OrmResult<RelationValue> {
        match relation.kind() {
            // The owner back-reference carries its own type, so polymorphic
            // owners resolve without consulting the relation's inverse.
            RelationKind::BelongsTo => {
                let value = match model.owner() {
                    Some(owner) => store.find(owner)?,
                    None => None,
                };
                Ok(RelationValue::One(value.map(Box::new)))
            }
            RelationKind::HasOne => {
                let owned = store.owned_by(&model.identifier(), &relation.inverse())?;
                Ok(RelationValue::One(owned.into_iter().next().map(Box::new)))
            }
            RelationKind::HasMany => {
                let owned = store.owned_by(&model.identifier(), &relation.inverse())?;
                Ok(RelationValue::Many(owned))
            }
        }
    }
}

//! Record instances and per-relation loaded state

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifier::ResourceIdentifier;

/// The in-memory value of a loaded relation.
///
/// Presence of a `RelationValue` on a model means the relation is *loaded*;
/// an empty value (`One(None)` or `Many(vec![])`) is still loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationValue {
    /// Single-valued relation: the related record, or none
    One(Option<Box<Model>>),
    /// Collection-valued relation: the related records
    Many(Vec<Model>),
}

/// A materialized record of one resource type.
///
/// Carries the persisted columns the engine cares about — attributes and the
/// polymorphic owner back-reference (the owner-type/owner-id column pair) —
/// plus in-memory relation state that is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    resource_type: String,
    id: String,
    attributes: BTreeMap<String, Value>,
    owner: Option<ResourceIdentifier>,
    #[serde(skip)]
    relations: HashMap<String, RelationValue>,
}

impl Model {
    /// Create a record with no attributes and no owner
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes: BTreeMap::new(),
            owner: None,
            relations: HashMap::new(),
        }
    }

    /// Add an attribute value, consuming and returning the record
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the owner back-reference, consuming and returning the record
    pub fn owned_by(mut self, owner: ResourceIdentifier) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The record's identifier
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
    }

    /// True if `other` names the same stored record (same type and id)
    pub fn is(&self, other: &Model) -> bool {
        self.resource_type == other.resource_type && self.id == other.id
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// The polymorphic owner back-reference, if any
    pub fn owner(&self) -> Option<&ResourceIdentifier> {
        self.owner.as_ref()
    }

    pub fn set_owner(&mut self, owner: Option<ResourceIdentifier>) {
        self.owner = owner;
    }

    /// True if the named relation has been loaded, regardless of its value
    pub fn relation_loaded(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// The loaded value of the named relation, if loaded
    pub fn relation(&self, name: &str) -> Option<&RelationValue> {
        self.relations.get(name)
    }

    pub(crate) fn relation_mut(&mut self, name: &str) -> Option<&mut RelationValue> {
        self.relations.get_mut(name)
    }

    /// The loaded to-one value, if the relation is loaded and non-null
    pub fn related_record(&self, name: &str) -> Option<&Model> {
        match self.relations.get(name)? {
            RelationValue::One(value) => value.as_deref(),
            RelationValue::Many(_) => None,
        }
    }

    /// The loaded to-many value, if the relation is loaded
    pub fn related_records(&self, name: &str) -> Option<&[Model]> {
        match self.relations.get(name)? {
            RelationValue::Many(records) => Some(records),
            RelationValue::One(_) => None,
        }
    }

    pub(crate) fn set_relation(&mut self, name: impl Into<String>, value: RelationValue) {
        self.relations.insert(name.into(), value);
    }

    /// Mark a to-one relation loaded with the given value
    pub fn set_related_one(&mut self, name: impl Into<String>, record: Option<Model>) {
        self.relations
            .insert(name.into(), RelationValue::One(record.map(Box::new)));
    }

    /// Mark a to-many relation loaded with the given records
    pub fn set_related_many(&mut self, name: impl Into<String>, records: Vec<Model>) {
        self.relations.insert(name.into(), RelationValue::Many(records));
    }

    /// Drop all in-memory relation state
    pub fn clear_relations(&mut self) {
        self.relations.clear();
    }
}

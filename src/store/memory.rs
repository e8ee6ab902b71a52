//! In-memory store backend
//!
//! Reference implementation of [`ModelStore`](super::ModelStore) and the
//! test double for acceptance tests. A `BTreeMap` keyed by (type, id) gives
//! the deterministic primary-key ordering the contract requires.

use std::collections::BTreeMap;

use crate::identifier::ResourceIdentifier;
use crate::model::Model;

use super::{ModelStore, StoreResult};

/// In-memory record storage keyed by (resource type, id)
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<(String, String), Model>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, replacing any existing row with the same identity
    pub fn insert(&mut self, model: Model) {
        let key = (model.resource_type().to_string(), model.id().to_string());
        let mut stored = model;
        stored.clear_relations();
        self.records.insert(key, stored);
    }

    /// True if a row exists for the identifier
    pub fn contains(&self, identifier: &ResourceIdentifier) -> bool {
        self.records
            .contains_key(&(identifier.resource_type.clone(), identifier.id.clone()))
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ModelStore for MemoryStore {
    fn find(&self, identifier: &ResourceIdentifier) -> StoreResult<Option<Model>> {
        let key = (identifier.resource_type.clone(), identifier.id.clone());
        Ok(self.records.get(&key).cloned())
    }

    fn owned_by(
        &self,
        owner: &ResourceIdentifier,
        resource_type: &str,
    ) -> StoreResult<Vec<Model>> {
        let results = self
            .records
            .range((resource_type.to_string(), String::new())..)
            .take_while(|((stored_type, _), _)| stored_type == resource_type)
            .filter(|(_, model)| model.owner() == Some(owner))
            .map(|(_, model)| model.clone())
            .collect();
        Ok(results)
    }

    fn save(&mut self, model: &Model) -> StoreResult<()> {
        self.insert(model.clone());
        Ok(())
    }

    fn delete(&mut self, identifier: &ResourceIdentifier) -> StoreResult<()> {
        self.records
            .remove(&(identifier.resource_type.clone(), identifier.id.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_save_delete() {
        let mut store = MemoryStore::new();
        let image = Model::new("images", "1");
        let identifier = image.identifier();

        store.save(&image).unwrap();
        assert_eq!(store.find(&identifier).unwrap(), Some(image));

        store.delete(&identifier).unwrap();
        assert_eq!(store.find(&identifier).unwrap(), None);
    }

    #[test]
    fn test_owned_by_filters_type_and_owner() {
        let mut store = MemoryStore::new();
        let post = ResourceIdentifier::new("posts", "1");
        let other = ResourceIdentifier::new("posts", "2");

        store.insert(Model::new("comments", "3").owned_by(post.clone()));
        store.insert(Model::new("comments", "1").owned_by(post.clone()));
        store.insert(Model::new("comments", "2").owned_by(other));
        store.insert(Model::new("images", "1").owned_by(post.clone()));

        let owned = store.owned_by(&post, "comments").unwrap();
        let ids: Vec<&str> = owned.iter().map(Model::id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_save_strips_relation_state() {
        let mut store = MemoryStore::new();
        let mut post = Model::new("posts", "1");
        post.set_related_one("image", Some(Model::new("images", "2")));

        store.save(&post).unwrap();

        let stored = store.find(&post.identifier()).unwrap().unwrap();
        assert!(!stored.relation_loaded("image"));
    }
}

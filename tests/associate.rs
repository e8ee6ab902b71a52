//! Acceptance tests for to-one `associate` against an in-memory store.
//!
//! Scenario: a `posts` resource with a polymorphic to-one `image` relation;
//! `images` records carry the owner back-reference.

use jsonapi_orm::{
    Model, OrmError, MemoryStore, ModelStore, Relation, ResourceIdentifier, Schema,
    SchemaRegistry,
};

fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    let mut posts = Schema::new("posts");
    posts.add_relation(Relation::has_one("image")).inverse_type("images");
    registry.register(posts);

    let mut images = Schema::new("images");
    images.add_relation(Relation::belongs_to("imageable"));
    registry.register(images);

    registry
}

fn image_id(id: &str) -> ResourceIdentifier {
    ResourceIdentifier::new("images", id)
}

#[test]
fn null_to_image() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10"));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("10")))
        .unwrap()
        .unwrap();

    assert_eq!(actual.id(), "10");
    assert!(post.relation_loaded("image"));
    assert!(post.related_record("image").unwrap().is(&actual));

    let stored = store.find(&image_id("10")).unwrap().unwrap();
    assert_eq!(stored.owner(), Some(&post.identifier()));
}

#[test]
fn image_to_null_keeps_image() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10").owned_by(post.identifier()));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(None)
        .unwrap();

    assert!(actual.is_none());
    assert!(post.relation_loaded("image"));
    assert!(post.related_record("image").is_none());

    // The image row survives with its owner columns cleared.
    let stored = store.find(&image_id("10")).unwrap().unwrap();
    assert!(stored.owner().is_none());
}

#[test]
fn image_to_null_deletes_image() {
    let mut registry = registry();
    registry
        .schema_for_mut("posts")
        .unwrap()
        .relationship_mut("image")
        .unwrap()
        .force_delete_detached_model();

    let mut store = MemoryStore::new();
    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10").owned_by(post.identifier()));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(None)
        .unwrap();

    assert!(actual.is_none());
    assert!(post.relation_loaded("image"));
    assert!(post.related_record("image").is_none());
    assert!(!store.contains(&image_id("10")));
}

#[test]
fn image_to_image_keeps_original_image() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10").owned_by(post.identifier()));
    store.insert(Model::new("images", "20"));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("20")))
        .unwrap()
        .unwrap();

    assert_eq!(actual.id(), "20");
    assert!(post.relation_loaded("image"));
    assert!(post.related_record("image").unwrap().is(&actual));

    let new_image = store.find(&image_id("20")).unwrap().unwrap();
    assert_eq!(new_image.owner(), Some(&post.identifier()));

    let old_image = store.find(&image_id("10")).unwrap().unwrap();
    assert!(old_image.owner().is_none());
}

#[test]
fn image_to_image_deletes_original_image() {
    let mut registry = registry();
    registry
        .schema_for_mut("posts")
        .unwrap()
        .relationship_mut("image")
        .unwrap()
        .force_delete_detached_model();

    let mut store = MemoryStore::new();
    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10").owned_by(post.identifier()));
    store.insert(Model::new("images", "20"));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("20")))
        .unwrap()
        .unwrap();

    assert_eq!(actual.id(), "20");
    assert!(post.related_record("image").unwrap().is(&actual));

    let new_image = store.find(&image_id("20")).unwrap().unwrap();
    assert_eq!(new_image.owner(), Some(&post.identifier()));
    assert!(!store.contains(&image_id("10")));
}

#[test]
fn same_image_writes_nothing_but_reloads() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10").owned_by(post.identifier()));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .with("imageable")
        .associate(Some(&image_id("10")))
        .unwrap()
        .unwrap();

    assert_eq!(actual.id(), "10");
    assert_eq!(actual.owner(), Some(&post.identifier()));
    // Include paths are honored even when no storage write was needed.
    assert!(actual.relation_loaded("imageable"));
    assert!(actual.related_record("imageable").unwrap().is(&post));
    assert!(post.related_record("image").unwrap().is(&actual));
}

#[test]
fn with_include_paths() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10"));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .with("imageable")
        .associate(Some(&image_id("10")))
        .unwrap()
        .unwrap();

    assert!(actual.relation_loaded("imageable"));
    assert!(actual.related_record("imageable").unwrap().is(&post));
}

#[test]
fn with_default_eager_loading() {
    let mut registry = registry();
    registry
        .schema_for_mut("images")
        .unwrap()
        .default_include("imageable");

    let mut store = MemoryStore::new();
    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10"));

    // No explicit `.with(...)`: the image schema's defaults apply.
    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("10")))
        .unwrap()
        .unwrap();

    assert!(actual.relation_loaded("imageable"));
    assert!(actual.related_record("imageable").unwrap().is(&post));
}

#[test]
fn no_paths_and_no_defaults_loads_nothing() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let mut post = Model::new("posts", "1");
    store.insert(post.clone());
    store.insert(Model::new("images", "10"));

    let actual = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("10")))
        .unwrap()
        .unwrap();

    assert!(!actual.relation_loaded("imageable"));
}

#[test]
fn dangling_identifier_fails() {
    let registry = registry();
    let mut store = MemoryStore::new();
    let mut post = Model::new("posts", "1");
    store.insert(post.clone());

    let result = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&image_id("99")));

    assert!(matches!(
        result,
        Err(OrmError::RelatedRecordNotFound(ref identifier)) if identifier.id == "99"
    ));
    assert!(!post.relation_loaded("image"));
}

#[test]
fn wrong_type_identifier_fails() {
    let registry = registry();
    let mut store = MemoryStore::new();
    let mut post = Model::new("posts", "1");
    let other = Model::new("posts", "2");
    store.insert(post.clone());
    store.insert(other.clone());

    // A posts identifier can never name a member of the image relation,
    // even though the record exists.
    let result = registry
        .repository("posts", &mut store)
        .unwrap()
        .modify_to_one(&mut post, "image")
        .unwrap()
        .associate(Some(&other.identifier()));

    assert!(matches!(result, Err(OrmError::RelatedRecordNotFound(_))));
}

#[test]
fn unknown_resource_type_fails() {
    let registry = registry();
    let mut store = MemoryStore::new();

    let result = registry.repository("authors", &mut store);
    assert!(matches!(
        result.err(),
        Some(OrmError::UnknownResourceType(ref t)) if t == "authors"
    ));
}

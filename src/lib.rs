//! # jsonapi-orm: JSON:API relationship-mutation engine
//!
//! Binds an ORM-style record model to JSON:API relationship semantics:
//! schemas describe relationship fields, repositories hand out typed
//! mutators, and mutators translate `associate` / `attach` / `detach` /
//! `sync` operations into consistent writes against a pluggable
//! [`ModelStore`], eager-loading requested include paths on the result.
//!
//! The engine is synchronous and request-scoped; each mutator invocation is
//! expected to run inside one ambient transaction owned by the store.
//!
//! ```
//! use jsonapi_orm::{
//!     MemoryStore, Model, Relation, ResourceIdentifier, Schema, SchemaRegistry,
//! };
//!
//! # fn main() -> jsonapi_orm::OrmResult<()> {
//! let mut registry = SchemaRegistry::new();
//! let mut posts = Schema::new("posts");
//! posts.add_relation(Relation::has_one("image")).inverse_type("images");
//! registry.register(posts);
//! let mut images = Schema::new("images");
//! images.add_relation(Relation::belongs_to("imageable"));
//! registry.register(images);
//!
//! let mut store = MemoryStore::new();
//! let mut post = Model::new("posts", "1");
//! store.insert(post.clone());
//! store.insert(Model::new("images", "7"));
//!
//! let image = registry
//!     .repository("posts", &mut store)?
//!     .modify_to_one(&mut post, "image")?
//!     .associate(Some(&ResourceIdentifier::new("images", "7")))?
//!     .unwrap();
//!
//! assert_eq!(image.owner(), Some(&post.identifier()));
//! assert!(post.relation_loaded("image"));
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod fields;
pub mod identifier;
pub mod loading;
pub mod model;
pub mod mutation;
pub mod repository;
pub mod schema;
pub mod store;

pub use context::RequestContext;
pub use error::{OrmError, OrmResult};
pub use fields::{Cardinality, Filter, Relation, RelationKind};
pub use identifier::ResourceIdentifier;
pub use loading::{EagerLoader, IncludePath, IncludePaths};
pub use model::{Model, RelationValue};
pub use mutation::{ToManyMutator, ToOneMutator};
pub use repository::Repository;
pub use schema::{Schema, SchemaRegistry};
pub use store::{MemoryStore, ModelStore, StoreError, StoreResult};

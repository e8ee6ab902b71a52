//! Relation field descriptor with fluent configuration

use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::context::RequestContext;

use super::filter::Filter;

/// Cardinality of a relationship field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// The storage shape of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Single child record holding an owner back-reference to this resource
    HasOne,
    /// Collection of child records holding owner back-references
    HasMany,
    /// The inverse side: this record's owner
    BelongsTo,
}

impl RelationKind {
    /// Cardinality is fixed by the kind at construction
    pub fn cardinality(self) -> Cardinality {
        match self {
            Self::HasOne | Self::BelongsTo => Cardinality::ToOne,
            Self::HasMany => Cardinality::ToMany,
        }
    }
}

/// Per-request visibility rule for a field
#[derive(Clone)]
enum HiddenRule {
    Never,
    Always,
    When(Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>),
}

impl fmt::Debug for HiddenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Always => f.write_str("Always"),
            Self::When(_) => f.write_str("When(<predicate>)"),
        }
    }
}

/// One relationship field on a resource type.
///
/// Configured fluently during schema registration through an exclusive
/// handle; every configuration method mutates in place and returns the same
/// handle for chaining. After registration the descriptor is read through
/// [`Schema::relationship`](crate::schema::Schema::relationship).
#[derive(Debug, Clone)]
pub struct Relation {
    kind: RelationKind,
    name: String,
    relation_name: Option<String>,
    inverse: Option<String>,
    uri_name: Option<String>,
    validated: bool,
    includable: bool,
    sparse_field: bool,
    force_delete_on_detach: bool,
    filters: Vec<Filter>,
    hidden: HiddenRule,
}

impl Relation {
    /// Construct a descriptor for `kind`, exposed as `name`, optionally
    /// backed by a differently named storage relation
    pub fn make(
        kind: RelationKind,
        name: impl Into<String>,
        relation_name: Option<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            relation_name,
            inverse: None,
            uri_name: None,
            validated: true,
            includable: true,
            sparse_field: true,
            force_delete_on_detach: false,
            filters: Vec::new(),
            hidden: HiddenRule::Never,
        }
    }

    /// A single-valued child relation
    pub fn has_one(name: impl Into<String>) -> Self {
        Self::make(RelationKind::HasOne, name, None)
    }

    /// A collection-valued child relation
    pub fn has_many(name: impl Into<String>) -> Self {
        Self::make(RelationKind::HasMany, name, None)
    }

    /// The owner side of a child relation
    pub fn belongs_to(name: impl Into<String>) -> Self {
        Self::make(RelationKind::BelongsTo, name, None)
    }

    // --- fluent configuration -------------------------------------------

    /// Override the inverse resource type name
    pub fn inverse_type(&mut self, resource_type: impl Into<String>) -> &mut Self {
        self.inverse = Some(resource_type.into());
        self
    }

    /// Require the field to be validated on write
    pub fn must_validate(&mut self) -> &mut Self {
        self.validated = true;
        self
    }

    /// Exempt the field from write validation
    pub fn not_validated(&mut self) -> &mut Self {
        self.validated = false;
        self
    }

    /// Mark the field as not usable in include paths
    pub fn cannot_eager_load(&mut self) -> &mut Self {
        self.includable = false;
        self
    }

    /// Re-enable use of the field in include paths
    pub fn eager_loadable(&mut self) -> &mut Self {
        self.includable = true;
        self
    }

    /// Exclude the field from sparse fieldsets
    pub fn not_sparse_field(&mut self) -> &mut Self {
        self.sparse_field = false;
        self
    }

    /// Override the URI field name
    pub fn with_uri_field_name(&mut self, uri_name: impl Into<String>) -> &mut Self {
        self.uri_name = Some(uri_name.into());
        self
    }

    /// Append filters, preserving registration order
    pub fn with_filters(&mut self, filters: impl IntoIterator<Item = Filter>) -> &mut Self {
        self.filters.extend(filters);
        self
    }

    /// Hide the field from every request
    pub fn hidden(&mut self) -> &mut Self {
        self.hidden = HiddenRule::Always;
        self
    }

    /// Hide the field when the predicate holds for the request
    pub fn hidden_when<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.hidden = HiddenRule::When(Arc::new(predicate));
        self
    }

    /// Permanently delete detached related records instead of clearing
    /// their back-reference
    pub fn force_delete_detached_model(&mut self) -> &mut Self {
        self.force_delete_on_detach = true;
        self
    }

    // --- queries --------------------------------------------------------

    /// The exposed field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name used when serializing the field
    pub fn serialized_field_name(&self) -> &str {
        &self.name
    }

    /// The underlying storage relation name; defaults to the exposed name
    pub fn relation_name(&self) -> &str {
        self.relation_name.as_deref().unwrap_or(&self.name)
    }

    /// The inverse resource type; defaults to kebab-case of the storage
    /// relation name
    pub fn inverse(&self) -> String {
        self.inverse
            .clone()
            .unwrap_or_else(|| self.relation_name().to_case(Case::Kebab))
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.kind.cardinality()
    }

    /// True for single-valued relations; mutually exclusive with [`to_many`](Self::to_many)
    pub fn to_one(&self) -> bool {
        self.cardinality() == Cardinality::ToOne
    }

    /// True for collection-valued relations
    pub fn to_many(&self) -> bool {
        self.cardinality() == Cardinality::ToMany
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// The URI field name; defaults to kebab-case of the exposed name
    pub fn uri_name(&self) -> String {
        self.uri_name
            .clone()
            .unwrap_or_else(|| self.name.to_case(Case::Kebab))
    }

    /// True if the field may appear in include paths
    pub fn is_include_path(&self) -> bool {
        self.includable
    }

    pub fn is_sparse_field(&self) -> bool {
        self.sparse_field
    }

    /// Configured filters in registration order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Evaluate the visibility rule for a request; fields are never hidden
    /// unless a rule was configured
    pub fn is_hidden(&self, context: &RequestContext) -> bool {
        match &self.hidden {
            HiddenRule::Never => false,
            HiddenRule::Always => true,
            HiddenRule::When(predicate) => predicate(context),
        }
    }

    pub fn force_delete_on_detach(&self) -> bool {
        self.force_delete_on_detach
    }
}

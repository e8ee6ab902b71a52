//! To-many mutator: `attach`, `detach`, and `sync` semantics

use std::collections::HashSet;

use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::fields::Relation;
use crate::identifier::ResourceIdentifier;
use crate::loading::{EagerLoader, IncludePaths};
use crate::model::Model;
use crate::schema::SchemaRegistry;
use crate::store::ModelStore;

use super::{dedup_identifiers, effective_include_paths};

/// Executes set mutations for one collection-valued relation on one parent.
///
/// Obtained from [`Repository::modify_to_many`](crate::repository::Repository::modify_to_many).
/// Input identifier order is irrelevant and duplicates are ignored; results
/// are always returned in ascending primary-key order.
pub struct ToManyMutator<'a, S: ModelStore> {
    pub(crate) registry: &'a SchemaRegistry,
    pub(crate) relation: &'a Relation,
    pub(crate) parent: &'a mut Model,
    pub(crate) store: &'a mut S,
    pub(crate) include: IncludePaths,
}

impl<'a, S: ModelStore> ToManyMutator<'a, S> {
    /// Request eager loading of the given paths on every returned record
    pub fn with(mut self, paths: impl Into<IncludePaths>) -> Self {
        self.include.extend(paths.into());
        self
    }

    /// Reconcile membership to exactly the requested set.
    ///
    /// Current members absent from the request are detached (owner cleared,
    /// or force-deleted per policy); requested members not yet attached get
    /// their owner set. Unchanged members see no writes, which makes `sync`
    /// idempotent.
    pub fn sync(mut self, identifiers: &[ResourceIdentifier]) -> OrmResult<Vec<Model>> {
        let parent_id = self.parent.identifier();
        let inverse = self.relation.inverse();
        let requested = self.validated_request(identifiers, &inverse)?;
        let requested_ids: HashSet<&str> =
            requested.iter().map(|identifier| identifier.id.as_str()).collect();

        let current = self.store.owned_by(&parent_id, &inverse)?;
        let current_ids: HashSet<String> =
            current.iter().map(|member| member.id().to_string()).collect();

        let mut members = Vec::with_capacity(requested.len());
        for member in current {
            if requested_ids.contains(member.id()) {
                members.push(member);
            } else {
                self.detach_member(member)?;
            }
        }

        for identifier in requested {
            if current_ids.contains(identifier.id.as_str()) {
                continue;
            }
            members.push(self.attach_member(identifier, &parent_id)?);
        }

        self.finalize(members)
    }

    /// Attach the requested records, leaving existing members in place
    pub fn attach(mut self, identifiers: &[ResourceIdentifier]) -> OrmResult<Vec<Model>> {
        let parent_id = self.parent.identifier();
        let inverse = self.relation.inverse();
        let requested = self.validated_request(identifiers, &inverse)?;

        let mut members = self.store.owned_by(&parent_id, &inverse)?;
        let current_ids: HashSet<String> =
            members.iter().map(|member| member.id().to_string()).collect();

        for identifier in requested {
            if current_ids.contains(identifier.id.as_str()) {
                continue;
            }
            members.push(self.attach_member(identifier, &parent_id)?);
        }

        self.finalize(members)
    }

    /// Detach only the requested records; identifiers that are not current
    /// members are ignored
    pub fn detach(mut self, identifiers: &[ResourceIdentifier]) -> OrmResult<Vec<Model>> {
        let parent_id = self.parent.identifier();
        let inverse = self.relation.inverse();
        let requested = self.validated_request(identifiers, &inverse)?;
        let requested_ids: HashSet<&str> =
            requested.iter().map(|identifier| identifier.id.as_str()).collect();

        let current = self.store.owned_by(&parent_id, &inverse)?;
        let mut members = Vec::new();
        for member in current {
            if requested_ids.contains(member.id()) {
                self.detach_member(member)?;
            } else {
                members.push(member);
            }
        }

        self.finalize(members)
    }

    /// De-duplicate the request and reject identifiers of the wrong type
    fn validated_request<'i>(
        &self,
        identifiers: &'i [ResourceIdentifier],
        inverse: &str,
    ) -> OrmResult<Vec<&'i ResourceIdentifier>> {
        let requested = dedup_identifiers(identifiers);
        for identifier in &requested {
            if identifier.resource_type != inverse {
                return Err(OrmError::RelatedRecordNotFound((*identifier).clone()));
            }
        }
        Ok(requested)
    }

    fn attach_member(
        &mut self,
        identifier: &ResourceIdentifier,
        parent_id: &ResourceIdentifier,
    ) -> OrmResult<Model> {
        let mut record = self
            .store
            .find(identifier)?
            .ok_or_else(|| OrmError::RelatedRecordNotFound(identifier.clone()))?;
        record.set_owner(Some(parent_id.clone()));
        self.store.save(&record)?;
        debug!(parent = %parent_id, record = %record.identifier(), "attached record");
        Ok(record)
    }

    fn detach_member(&mut self, mut member: Model) -> OrmResult<()> {
        if self.relation.force_delete_on_detach() {
            debug!(record = %member.identifier(), "force deleting detached record");
            self.store.delete(&member.identifier())?;
        } else {
            debug!(record = %member.identifier(), "clearing owner of detached record");
            member.set_owner(None);
            self.store.save(&member)?;
        }
        Ok(())
    }

    /// Order the result, eager-load it, and mark the parent's relation loaded
    fn finalize(self, mut members: Vec<Model>) -> OrmResult<Vec<Model>> {
        members.sort_by(|a, b| a.id().cmp(b.id()));

        let paths =
            effective_include_paths(self.registry, &self.include, &self.relation.inverse())?;
        let loader = EagerLoader::new(self.registry);
        for member in members.iter_mut() {
            loader.load(&*self.store, member, &paths)?;
        }

        self.parent
            .set_related_many(self.relation.name().to_string(), members.clone());
        Ok(members)
    }
}

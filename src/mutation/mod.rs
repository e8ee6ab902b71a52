//! Relationship mutators
//!
//! A mutator is bound to one (parent record, relationship field) pair by the
//! repository, optionally takes include paths via `.with(...)`, and performs
//! all of its storage writes inside the single terminal call.

pub mod to_many;
pub mod to_one;

use std::collections::HashSet;

use crate::error::OrmResult;
use crate::identifier::ResourceIdentifier;
use crate::loading::IncludePaths;
use crate::schema::SchemaRegistry;

pub use to_many::ToManyMutator;
pub use to_one::ToOneMutator;

/// Explicitly requested include paths win; otherwise fall back to the
/// schema-level defaults of the returned record's type.
pub(crate) fn effective_include_paths(
    registry: &SchemaRegistry,
    requested: &IncludePaths,
    resource_type: &str,
) -> OrmResult<IncludePaths> {
    if requested.is_empty() {
        Ok(registry
            .schema_for(resource_type)?
            .default_include_paths()
            .clone())
    } else {
        Ok(requested.clone())
    }
}

/// De-duplicate a requested identifier set, preserving first occurrence
pub(crate) fn dedup_identifiers(
    identifiers: &[ResourceIdentifier],
) -> Vec<&ResourceIdentifier> {
    let mut seen = HashSet::new();
    identifiers
        .iter()
        .filter(|identifier| seen.insert(*identifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let a = ResourceIdentifier::new("tags", "1");
        let b = ResourceIdentifier::new("tags", "2");
        let identifiers = vec![a.clone(), b.clone(), a.clone()];

        let deduped = dedup_identifiers(&identifiers);
        assert_eq!(deduped, vec![&a, &b]);
    }
}

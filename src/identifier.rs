//! Resource identification across the API boundary

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON:API resource identifier: a `(type, id)` pair naming exactly one
/// stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type name, serialized as `type` per JSON:API
    #[serde(rename = "type")]
    pub resource_type: String,

    /// The record's primary key, always transported as a string
    pub id: String,
}

impl ResourceIdentifier {
    /// Create a new resource identifier
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.id)
    }
}

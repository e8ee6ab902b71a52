//! Named filters exposed by relationship fields

use serde::{Deserialize, Serialize};

/// A filter a relationship field advertises to query layers.
///
/// The engine only stores and reports these; applying them is the query
/// layer's concern. Filters are kept in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    name: String,
    column: String,
}

impl Filter {
    /// Create a filter whose column matches its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
        }
    }

    /// Override the target column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

//! Request context passed to per-field visibility predicates

/// Request-scoped information exposed to hidden-field predicates.
///
/// The engine never inspects the context itself; it only hands it to
/// predicates configured via [`Relation::hidden_when`](crate::fields::Relation::hidden_when).
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: String,
}

impl RequestContext {
    /// Create a context for the given HTTP method
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }

    /// The request method, as given
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Case-insensitive method check
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("GET")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_method_ignores_case() {
        let context = RequestContext::new("POST");
        assert!(context.is_method("post"));
        assert!(!context.is_method("GET"));
    }
}

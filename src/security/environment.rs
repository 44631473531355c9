//! Request environment consulted by gates and merged into parameters.

use std::collections::{BTreeMap, HashMap};

use crate::routing::path::header_key;

/// Ambient request context for one dispatch.
///
/// `server` holds request headers under their `HTTP_*` keys, `request`
/// holds request data merged into every parameter set.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    server: HashMap<String, String>,
    request: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a request header by name (`Custom-Request`, `tpb nonce`, ...).
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Add a request data value.
    pub fn with_request_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.insert(key.into(), value.into());
        self
    }

    /// Set a request header by name; names that normalize to nothing are ignored.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let key = header_key(name);
        if !key.is_empty() {
            self.server.insert(key, value.into());
        }
    }

    /// Remove a request header by name.
    pub fn remove_header(&mut self, name: &str) {
        self.server.remove(&header_key(name));
    }

    /// Raw server variable lookup.
    pub fn server_var(&self, key: &str) -> Option<&str> {
        self.server.get(key).map(String::as_str)
    }

    /// Request data merged into dispatch parameters.
    pub fn request_data(&self) -> &BTreeMap<String, String> {
        &self.request
    }

    /// Whether the header derived from `identifier` is present and truthy.
    ///
    /// An identifier that normalizes to nothing is always valid.
    pub fn header_valid(&self, identifier: &str) -> bool {
        let key = header_key(identifier);

        if key.is_empty() {
            return true;
        }

        self.server_var(&key).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_valid() {
        let env = Environment::new();
        assert!(env.header_valid(""));
        assert!(env.header_valid("/"));
        assert!(!env.header_valid("TESTS"));

        let env = env.with_header("tests", "1");
        assert!(env.header_valid("TESTS"));
        assert_eq!(env.server_var("HTTP_TESTS"), Some("1"));
    }

    #[test]
    fn test_falsy_values() {
        let mut env = Environment::new().with_header("Custom-Request", "0");
        assert!(!env.header_valid("custom request"));

        env.set_header("Custom-Request", "");
        assert!(!env.header_valid("Custom-Request"));

        env.set_header("Custom-Request", "yes");
        assert!(env.header_valid("Custom-Request"));

        env.remove_header("custom/request");
        assert!(!env.header_valid("Custom-Request"));
    }

    #[test]
    fn test_request_data() {
        let env = Environment::new()
            .with_request_value("lang", "en")
            .with_request_value("page", "2");
        assert_eq!(env.request_data().len(), 2);
        assert_eq!(env.request_data().get("lang").map(String::as_str), Some("en"));
    }
}

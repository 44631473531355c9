//! Validation capability consulted before dispatch.

use std::fmt;

use crate::routing::path::prepare_header;
use crate::security::environment::Environment;

/// Decides whether a call for `route` with `method` may proceed.
pub trait Validator: Send + Sync {
    fn validate(&self, route: &str, method: &str, env: &Environment) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str, &str, &Environment) -> bool + Send + Sync,
{
    fn validate(&self, route: &str, method: &str, env: &Environment) -> bool {
        self(route, method, env)
    }
}

/// Requires the request header derived from an identifier to be truthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGate {
    identifier: String,
}

impl HeaderGate {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: prepare_header(identifier),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl Validator for HeaderGate {
    fn validate(&self, _route: &str, _method: &str, env: &Environment) -> bool {
        env.header_valid(&self.identifier)
    }
}

impl fmt::Display for HeaderGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_validator() {
        let only_get = |_: &str, method: &str, _: &Environment| method == "GET";
        let env = Environment::new();

        assert!(only_get.validate("user/1", "GET", &env));
        assert!(!only_get.validate("user/1", "POST", &env));
    }

    #[test]
    fn test_header_gate() {
        let gate = HeaderGate::new(" tpb nonce");
        assert_eq!(gate.identifier(), "Tpb-Nonce");
        assert_eq!(gate.to_string(), "Tpb-Nonce");

        let env = Environment::new();
        assert!(!gate.validate("x", "GET", &env));

        let env = env.with_header("TPB-NONCE", "abc");
        assert!(gate.validate("x", "GET", &env));
    }

    #[test]
    fn test_empty_gate_passes() {
        assert!(HeaderGate::new("").validate("x", "GET", &Environment::new()));
    }
}

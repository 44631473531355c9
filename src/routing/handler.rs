//! Per-route method bindings.
//!
//! # Responsibilities
//! - Bind callbacks to method keys, including the `*` wildcard
//! - Enforce the identifier gate and optional validator before any callback
//! - Resolve a method to its callback, falling back to the wildcard
//!
//! # Design Decisions
//! - Method keys are stored as given; the router upper-cases before dispatch
//! - Re-binding a method replaces the previous callback
//! - A rejected gate and a missing binding both yield `false`, so callers
//!   cannot probe which routes or methods exist

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::params::Params;
use crate::routing::path::WILDCARD;
use crate::security::environment::Environment;
use crate::security::validator::{HeaderGate, Validator};

/// A bound route callback. Its return value is the dispatch result.
pub type Callback = Arc<dyn Fn(&Params) -> bool + Send + Sync>;

/// How an execution ended, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Execution {
    Gated,
    Rejected,
    Unbound,
    Completed(bool),
}

impl Execution {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Execution::Gated => "gated",
            Execution::Rejected => "rejected",
            Execution::Unbound => "unbound",
            Execution::Completed(true) => "handled",
            Execution::Completed(false) => "declined",
        }
    }

    pub(crate) fn succeeded(&self) -> bool {
        matches!(self, Execution::Completed(true))
    }
}

/// Method bindings for one route, behind an identifier gate.
#[derive(Clone)]
pub struct Handler {
    gate: HeaderGate,
    validator: Option<Arc<dyn Validator>>,
    handles: HashMap<String, Callback>,
}

impl Handler {
    /// Create a handler gated by the header derived from `identifier`.
    ///
    /// An identifier that normalizes to nothing leaves the handler ungated.
    pub fn new(identifier: &str) -> Self {
        Self {
            gate: HeaderGate::new(identifier),
            validator: None,
            handles: HashMap::new(),
        }
    }

    /// Add a validator consulted after the identifier gate.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Canonical dashed identifier (`Custom-Request`).
    pub fn identifier(&self) -> &str {
        self.gate.identifier()
    }

    /// Bind `action` to `method`, replacing any previous binding.
    pub fn handle<F>(&mut self, method: &str, action: F)
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.bind(method, Arc::new(action));
    }

    pub(crate) fn bind(&mut self, method: &str, action: Callback) {
        self.handles.insert(method.to_string(), action);
    }

    /// Bound method keys, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.handles.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Whether `method` resolves to a callback, directly or through `*`.
    pub fn handles(&self, method: &str) -> bool {
        self.resolve(method).is_some()
    }

    /// Run the callback for `method`.
    ///
    /// Returns `false` when the gate or validator rejects the call or no
    /// callback is bound; otherwise returns the callback's own result.
    pub fn execute(&self, method: &str, params: &Params, env: &Environment) -> bool {
        self.run(method, params, env).succeeded()
    }

    pub(crate) fn run(&self, method: &str, params: &Params, env: &Environment) -> Execution {
        if !self.gate.validate(params.route(), method, env) {
            return Execution::Gated;
        }

        if let Some(validator) = &self.validator {
            if !validator.validate(params.route(), method, env) {
                return Execution::Rejected;
            }
        }

        match self.resolve(method) {
            Some(callback) => Execution::Completed(callback(params)),
            None => Execution::Unbound,
        }
    }

    fn resolve(&self, method: &str) -> Option<&Callback> {
        self.handles
            .get(method)
            .or_else(|| self.handles.get(WILDCARD))
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("identifier", &self.identifier())
            .field("validator", &self.validator.is_some())
            .field("methods", &self.methods())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn open_env(handler: &Handler) -> Environment {
        Environment::new().with_header(handler.identifier(), "1")
    }

    #[test]
    fn test_execute_registered_method() {
        let mut handler = Handler::new("test");
        handler.handle("name", |p| p.get("first") == Some("1"));

        let params = Params::new("name", "route").with_values([("first", "1"), ("second", "two")]);
        assert!(handler.execute("name", &params, &open_env(&handler)));
    }

    #[test]
    fn test_execute_returns_false_if_method_not_registered() {
        let handler = Handler::new("identifier");
        let env = open_env(&handler);
        assert!(!handler.execute("method", &Params::default(), &env));
    }

    #[test]
    fn test_execute_on_empty_identifier() {
        let mut handler = Handler::new("");
        handler.handle("OPTION", |_| true);

        assert_eq!(handler.identifier(), "");
        assert!(handler.execute("OPTION", &Params::default(), &Environment::new()));
    }

    #[test]
    fn test_handle_multiple_methods() {
        let mut handler = Handler::new("Custom-Request");
        handler.handle("method1", |_| true);
        handler.handle("method2", |_| false);
        let env = open_env(&handler);

        assert!(handler.execute("method1", &Params::default(), &env));
        assert!(!handler.execute("method2", &Params::default(), &env));
        assert_eq!(handler.methods(), vec!["method1", "method2"]);
    }

    #[test]
    fn test_handle_wildcard() {
        let mut handler = Handler::new("test");
        let get_calls = Arc::new(AtomicUsize::new(0));
        let any_calls = Arc::new(AtomicUsize::new(0));

        let counter = get_calls.clone();
        handler.handle("GET", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let counter = any_calls.clone();
        handler.handle("*", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let env = open_env(&handler);
        assert!(handler.execute("GET", &Params::default(), &env));
        assert!(handler.execute("OPTIONS", &Params::default(), &env));
        assert!(handler.execute("RANDOM", &Params::default(), &env));

        assert_eq!(get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(any_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rebinding_overwrites() {
        let mut handler = Handler::default();
        handler.handle("GET", |_| false);
        handler.handle("GET", |_| true);

        assert!(handler.execute("GET", &Params::default(), &Environment::new()));
        assert_eq!(handler.methods(), vec!["GET"]);
    }

    #[test]
    fn test_gate_precedence() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut handler = Handler::new("secret");
        handler.handle("GET", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let env = Environment::new();
        assert_eq!(handler.run("GET", &Params::default(), &env), Execution::Gated);
        assert!(!handler.execute("GET", &Params::default(), &env));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validator_rejects() {
        let mut handler = Handler::default()
            .with_validator(|route: &str, _: &str, _: &Environment| route.starts_with("public"));
        handler.handle("*", |_| true);
        let env = Environment::new();

        assert!(handler.execute("GET", &Params::new("GET", "public/page"), &env));
        assert_eq!(
            handler.run("GET", &Params::new("GET", "private/page"), &env),
            Execution::Rejected
        );
    }

    #[test]
    fn test_unbound_resolution() {
        let mut handler = Handler::default();
        handler.handle("POST", |_| true);

        assert!(handler.handles("POST"));
        assert!(!handler.handles("GET"));
        assert_eq!(
            handler.run("GET", &Params::default(), &Environment::new()),
            Execution::Unbound
        );
    }
}

//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Own the route table (normalized pattern → Handler)
//! - Register routes directly, per method, or in bulk from a template loader
//! - Dispatch a (path, method) pair: exact key first, then pattern scan
//! - Admit live request URIs under the router prefix
//!
//! # Design Decisions
//! - Insertion order is kept; the first matching pattern wins
//! - O(1) exact lookup via HashMap index, O(n) pattern scan otherwise
//!   (acceptable for tables of tens to low hundreds of routes)
//! - Re-registering a pattern replaces its handler in place, keeping its
//!   scan position
//! - No internal locking; share a Router behind an external lock if needed

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::observability::metrics;
use crate::routing::handler::{Callback, Handler};
use crate::routing::matcher::RoutePattern;
use crate::routing::params::Params;
use crate::routing::path::{
    prepare_pathname, request_path, DEFAULT_NAMEPATH, HTTP_METHODS, WILDCARD,
};
use crate::routing::validation::validate_route;
use crate::security::environment::Environment;
use crate::security::validator::Validator;
use crate::templates::FileLoader;

/// Result of admitting a live request through [`Router::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A route matched and its callback reported success.
    Handled,
    /// Not a bridge request, rejected, or nothing answered it.
    NotFound,
}

impl RouteOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, RouteOutcome::Handled)
    }
}

/// A registered route.
struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

/// The route table.
pub struct Router {
    prefix: String,
    routes: Vec<Route>,
    index: HashMap<String, usize>,
    validator: Option<Arc<dyn Validator>>,
}

impl Router {
    /// Create an empty router; an empty prefix falls back to [`DEFAULT_NAMEPATH`].
    pub fn new(prefix: &str) -> Self {
        let prefix = match prepare_pathname(prefix) {
            clean if clean.is_empty() => DEFAULT_NAMEPATH.to_string(),
            clean => clean,
        };

        Self {
            prefix,
            routes: Vec::new(),
            index: HashMap::new(),
            validator: None,
        }
    }

    /// Add a validator consulted by [`Router::route`] with `(prefix, method, env)`.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Build a router from configuration.
    ///
    /// Templates are autoloaded first (when enabled), then explicit routes
    /// are registered, replacing autoloaded entries with the same pattern.
    pub fn from_config(config: &BridgeConfig) -> Self {
        let mut router = Router::new(&config.prefix);
        let loader = Arc::new(config.templates.loader());

        if config.templates.autoload {
            let handler = Handler::new(&config.templates.identifier);
            if !router.load(&loader, handler) {
                tracing::warn!(
                    location = %loader.location().display(),
                    "Template autoload skipped"
                );
            }
        }

        for route in &config.routes {
            let template = prepare_pathname(route.template_name());
            let callback: Callback = {
                let loader = Arc::clone(&loader);
                Arc::new(move |params: &Params| loader.load_template(&template, params))
            };

            let mut handler = Handler::new(&config.templates.identifier);
            for method in route.effective_methods() {
                handler.bind(&method, Arc::clone(&callback));
            }

            if !router.add(&route.pattern, handler) {
                tracing::warn!(
                    pattern = %route.pattern,
                    "Skipping configured route with invalid pattern"
                );
            }
        }

        tracing::info!(
            prefix = %router.prefix,
            routes = router.len(),
            "Router configured"
        );

        router
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Validate an endpoint, requiring the router prefix when `with_prefix`.
    pub fn is_valid(&self, endpoint: &str, with_prefix: bool) -> bool {
        let prefix = if with_prefix { self.prefix.as_str() } else { "" };
        validate_route(endpoint, prefix).is_ok()
    }

    /// Store `handler` under `pattern`, replacing any previous handler.
    pub fn add(&mut self, pattern: &str, handler: Handler) -> bool {
        let pattern = prepare_pathname(pattern);

        if let Err(reason) = validate_route(&pattern, "") {
            tracing::debug!(pattern = %pattern, %reason, "Route rejected");
            metrics::record_registration("add", false);
            return false;
        }

        match self.index.get(&pattern).copied() {
            Some(slot) => self.routes[slot].handler = handler,
            None => {
                self.insert(&pattern, handler);
            }
        }

        metrics::record_registration("add", true);
        true
    }

    /// Bind `action` to `method` on `pattern`, or to every standard HTTP
    /// method when `method` is `None`.
    ///
    /// The pattern's handler is created on first use and then reused, so
    /// bindings accumulate across calls.
    pub fn map<F>(&mut self, pattern: &str, action: F, method: Option<&str>) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        let pattern = prepare_pathname(pattern);

        if let Err(reason) = validate_route(&pattern, "") {
            tracing::debug!(pattern = %pattern, %reason, "Mapping rejected");
            metrics::record_registration("map", false);
            return false;
        }

        let methods: Vec<String> = match method.map(str::trim) {
            Some("") => {
                tracing::debug!(pattern = %pattern, "Mapping rejected: blank method");
                metrics::record_registration("map", false);
                return false;
            }
            Some(method) => vec![method.to_uppercase()],
            None => HTTP_METHODS.iter().map(|m| m.to_string()).collect(),
        };

        let slot = match self.index.get(&pattern).copied() {
            Some(slot) => slot,
            None => {
                let handler = Handler::new(&self.prefix);
                self.insert(&pattern, handler)
            }
        };

        let callback: Callback = Arc::new(action);
        for method in &methods {
            self.routes[slot].handler.bind(method, Arc::clone(&callback));
        }

        metrics::record_registration("map", true);
        true
    }

    pub fn get<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some("GET"))
    }

    pub fn post<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some("POST"))
    }

    pub fn put<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some("PUT"))
    }

    pub fn patch<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some("PATCH"))
    }

    pub fn delete<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some("DELETE"))
    }

    /// Bind `action` to the wildcard, serving methods without their own binding.
    pub fn any<F>(&mut self, pattern: &str, action: F) -> bool
    where
        F: Fn(&Params) -> bool + Send + Sync + 'static,
    {
        self.map(pattern, action, Some(WILDCARD))
    }

    /// Register every template the loader discovers.
    ///
    /// Each template gets a clone of `handler` whose wildcard binding serves
    /// that template. Returns `false` when the location is not a readable
    /// directory.
    pub fn load(&mut self, loader: &Arc<FileLoader>, handler: Handler) -> bool {
        let location = loader.location();

        if let Err(err) = std::fs::read_dir(location) {
            tracing::debug!(
                location = %location.display(),
                error = %err,
                "Template location unreadable"
            );
            metrics::record_registration("load", false);
            return false;
        }

        let mut loaded = 0usize;
        for name in loader.discover() {
            let mut bound = handler.clone();
            bound.bind(WILDCARD, loader.callback(&name));

            if self.add(&name, bound) {
                loaded += 1;
            } else {
                tracing::warn!(template = %name, "Skipping template with invalid route name");
            }
        }

        tracing::info!(
            location = %location.display(),
            templates = loaded,
            "Templates loaded"
        );
        metrics::record_registration("load", true);
        true
    }

    /// Dispatch `path` with `method` to the first route that answers it.
    pub fn dispatch(&self, path: &str, method: &str, env: &Environment) -> bool {
        let path = prepare_pathname(path);
        let method = method.trim().to_uppercase();

        if path.is_empty() || method.is_empty() {
            tracing::debug!(
                path = %path,
                method = %method,
                "Dispatch rejected: empty path or method"
            );
            metrics::record_dispatch(&method, "invalid");
            return false;
        }

        let mut params = Params::new(method.as_str(), path.as_str()).with_values(
            env.request_data()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        // 1. Exact key
        let route = match self.index.get(&path) {
            Some(&slot) => Some(&self.routes[slot]),
            // 2. Pattern scan in insertion order
            None => self.routes.iter().find_map(|route| {
                let captures = route.pattern.matches(&path)?;
                params.matched(route.pattern.as_str(), captures);
                Some(route)
            }),
        };

        let Some(route) = route else {
            tracing::debug!(path = %path, method = %method, "No route matched");
            metrics::record_dispatch(&method, "unmatched");
            return false;
        };

        // 3. Execute
        let execution = route.handler.run(&method, &params, env);

        tracing::debug!(
            path = %path,
            method = %method,
            pattern = %route.pattern.as_str(),
            outcome = execution.as_str(),
            "Dispatched"
        );
        metrics::record_dispatch(&method, execution.as_str());

        execution.succeeded()
    }

    /// Admit a live request URI and dispatch it below the prefix.
    ///
    /// An empty method defaults to `GET`.
    pub fn route(&self, uri: &str, method: &str, env: &Environment) -> RouteOutcome {
        if let Err(reason) = validate_route(uri, &self.prefix) {
            tracing::debug!(uri = %uri, %reason, "Not a bridge request");
            return RouteOutcome::NotFound;
        }

        let method = match method.trim() {
            "" => "GET".to_string(),
            method => method.to_uppercase(),
        };

        if let Some(validator) = &self.validator {
            if !validator.validate(&self.prefix, &method, env) {
                tracing::debug!(
                    uri = %uri,
                    method = %method,
                    "Request refused by router validator"
                );
                return RouteOutcome::NotFound;
            }
        }

        let Some(path) = request_path(uri) else {
            return RouteOutcome::NotFound;
        };
        let path = prepare_pathname(&path);
        let rest = path
            .strip_prefix(self.prefix.as_str())
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or_default();

        if self.dispatch(rest, &method, env) {
            RouteOutcome::Handled
        } else {
            RouteOutcome::NotFound
        }
    }

    /// Registered patterns in insertion order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.pattern.as_str())
    }

    /// Handler stored under `pattern`.
    pub fn handler(&self, pattern: &str) -> Option<&Handler> {
        let slot = *self.index.get(&prepare_pathname(pattern))?;
        Some(&self.routes[slot].handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn insert(&mut self, pattern: &str, handler: Handler) -> usize {
        let slot = self.routes.len();
        let pattern = RoutePattern::parse(pattern);

        if pattern.is_dynamic() {
            tracing::debug!(
                pattern = %pattern.as_str(),
                placeholders = ?pattern.placeholders().collect::<Vec<_>>(),
                "Dynamic route registered"
            );
        }

        let key = pattern.as_str().to_string();
        self.routes.push(Route { pattern, handler });
        self.index.insert(key, slot);
        slot
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(DEFAULT_NAMEPATH)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("patterns", &self.patterns().collect::<Vec<_>>())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

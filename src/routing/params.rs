//! Per-dispatch parameter set handed to callbacks.

use std::collections::BTreeMap;

/// Values available to a callback for one dispatch call.
///
/// Lookups through [`Params::get`] see ambient request data first and
/// placeholder captures on top of it: a capture named like an ambient key
/// shadows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    method: String,
    route: String,
    pattern: String,
    values: BTreeMap<String, String>,
    captures: BTreeMap<String, String>,
}

impl Params {
    /// Create a parameter set for `method` on the normalized `route`.
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        let route = route.into();
        Self {
            method: method.into(),
            pattern: route.clone(),
            route,
            ..Self::default()
        }
    }

    /// Merge ambient request data.
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Record the table key that matched and the placeholder values it produced.
    pub(crate) fn matched(&mut self, pattern: &str, captures: BTreeMap<String, String>) {
        self.pattern = pattern.to_string();
        self.captures = captures;
    }

    /// Upper-cased request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalized route that was dispatched.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Route table key that answered this dispatch.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder values only.
    pub fn captures(&self) -> &BTreeMap<String, String> {
        &self.captures
    }

    /// Look up a value, captures first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .get(name)
            .or_else(|| self.values.get(name))
            .map(String::as_str)
    }

    /// Iterate the merged view in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut merged: BTreeMap<&str, &str> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        merged.extend(self.captures.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        merged.into_iter()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.captures.is_empty()
    }
}

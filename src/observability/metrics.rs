//! Metrics collection.
//!
//! # Metrics
//! - `bridge_routes_registered_total` (counter): registrations by kind, outcome
//! - `bridge_dispatch_total` (counter): dispatch calls by method, outcome
//! - `bridge_template_loads_total` (counter): template loads by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Outcomes are finer-grained than the `bool` returned to callers
//! - Methods outside the standard set share the `OTHER` label

use metrics::counter;

use crate::routing::path::HTTP_METHODS;

/// Record a route registration attempt (`add`, `map`, `load`).
pub fn record_registration(kind: &'static str, accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    counter!("bridge_routes_registered_total", "kind" => kind, "outcome" => outcome).increment(1);
}

/// Record a dispatch call and how it ended.
pub fn record_dispatch(method: &str, outcome: &'static str) {
    counter!("bridge_dispatch_total", "method" => method_label(method), "outcome" => outcome)
        .increment(1);
}

/// Bounded label for a dispatched method.
fn method_label(method: &str) -> &'static str {
    HTTP_METHODS
        .iter()
        .find(|known| **known == method)
        .copied()
        .unwrap_or("OTHER")
}

/// Record a template load attempt.
pub fn record_template_load(outcome: &'static str) {
    counter!("bridge_template_loads_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label() {
        assert_eq!(method_label("GET"), "GET");
        assert_eq!(method_label("DELETE"), "DELETE");
        assert_eq!(method_label("OPTIONS"), "OTHER");
        assert_eq!(method_label("X-CUSTOM-123"), "OTHER");
        assert_eq!(method_label(""), "OTHER");
    }
}

//! Structural route validation.
//!
//! # Responsibilities
//! - Reject empty routes and empty segments
//! - Enforce an optional leading prefix segment
//! - Enforce one well-formed `[name]` placeholder per segment at most
//!
//! # Design Decisions
//! - Same check for registered patterns and live paths; only the prefix differs
//! - The reason is kept in `RouteError` for logs, callers only see a bool

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::routing::path::{prepare_pathname, request_path};

/// Literal text, one `[name]` placeholder, literal text.
static PLACEHOLDER_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\[\]]*\[[^\[\]]+\][^\[\]]*$").unwrap());

/// Why a route failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The endpoint has no usable path component.
    #[error("route has no path component")]
    NoPath,

    /// The first segment is not the required prefix.
    #[error("route must start with `{expected}`")]
    MissingPrefix { expected: String },

    /// A segment is empty (`a//b`, or an empty route).
    #[error("empty segment at position {0}")]
    EmptySegment(usize),

    /// A segment is the bare `[]` token.
    #[error("placeholder without a name at position {0}")]
    EmptyPlaceholder(usize),

    /// `[` and `]` counts differ.
    #[error("unbalanced brackets in segment `{0}`")]
    UnbalancedBrackets(String),

    /// Brackets present but not as exactly one `[name]`.
    #[error("segment `{0}` must hold exactly one placeholder")]
    MalformedPlaceholder(String),
}

/// Validate a route, optionally requiring `prefix` as its first segment.
///
/// An empty `prefix` disables the prefix check.
pub fn validate_route(value: &str, prefix: &str) -> Result<(), RouteError> {
    let path = request_path(value).ok_or(RouteError::NoPath)?;
    let clean = prepare_pathname(&path);
    let parts: Vec<&str> = clean.split('/').collect();

    if !prefix.is_empty() && parts[0] != prefix {
        return Err(RouteError::MissingPrefix {
            expected: prefix.to_string(),
        });
    }

    parts
        .iter()
        .enumerate()
        .try_for_each(|(position, part)| validate_segment(position, part))
}

/// Boolean form of [`validate_route`].
pub fn is_valid_route(value: &str, prefix: &str) -> bool {
    validate_route(value, prefix).is_ok()
}

fn validate_segment(position: usize, part: &str) -> Result<(), RouteError> {
    if part.is_empty() {
        return Err(RouteError::EmptySegment(position));
    }

    if part == "[]" {
        return Err(RouteError::EmptyPlaceholder(position));
    }

    let open = part.matches('[').count();
    let close = part.matches(']').count();

    if open != close {
        return Err(RouteError::UnbalancedBrackets(part.to_string()));
    }

    if open > 0 && !PLACEHOLDER_SEGMENT.is_match(part) {
        return Err(RouteError::MalformedPlaceholder(part.to_string()));
    }

    Ok(())
}

//! Path and header-name normalization.
//!
//! # Responsibilities
//! - Canonicalize raw paths into trimmed, slash-separated form
//! - Derive header identifiers and server-variable keys from route names
//! - Build template file extensions
//! - Extract the path component from an endpoint or URL
//!
//! # Design Decisions
//! - All functions are pure and idempotent on their own output
//! - Header names are ASCII only: any other character separates words

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Fallback for an empty router prefix or loader location.
pub const DEFAULT_NAMEPATH: &str = "bridge";

/// Methods bound by `Router::map` when no method is given.
pub const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Reserved method key answering every method without its own binding.
pub const WILDCARD: &str = "*";

/// Base extension of template files.
pub const TEMPLATE_EXTENSION: &str = "html";

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Normalize a path: backslashes become `/`, then surrounding slashes and
/// whitespace are trimmed.
pub fn prepare_pathname(value: &str) -> String {
    value
        .replace('\\', "/")
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Turn a route or free-form name into a dashed header name (`Deep-Test`).
pub fn prepare_header(value: &str) -> String {
    let value = prepare_pathname(value);
    let spaced = NON_WORD.replace_all(&value, " ");

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();

    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Server-variable key for a header name (`HTTP_DEEP_TEST`).
///
/// Returns an empty string when the name normalizes to nothing.
pub fn header_key(value: &str) -> String {
    let header = prepare_header(value);

    if header.is_empty() {
        return String::new();
    }

    format!("HTTP_{}", header.to_ascii_uppercase().replace('-', "_"))
}

/// Template file extension for an optional suffix (`.partial.html`).
pub fn prepare_extension(value: &str) -> String {
    let suffix = value.trim_matches(|c: char| c == '.' || c == ' ');

    if suffix.is_empty() {
        format!(".{TEMPLATE_EXTENSION}")
    } else {
        format!(".{suffix}.{TEMPLATE_EXTENSION}")
    }
}

/// Path component of an endpoint.
///
/// Absolute URLs must parse, and lose their scheme and authority; every
/// endpoint then loses its query string and fragment. The path is returned
/// as written, never percent-encoded. `None` means the endpoint is not a
/// usable URL.
pub fn request_path(value: &str) -> Option<String> {
    let scheme = value
        .find("://")
        .filter(|&end| !value[..end].contains(['/', '?', '#']));

    let path = match scheme {
        Some(scheme_end) => {
            Url::parse(value).ok()?;
            let rest = &value[scheme_end + 3..];
            let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            &rest[authority_end..]
        }
        None => value,
    };

    let end = path.find(['?', '#']).unwrap_or(path.len());
    Some(path[..end].to_string())
}

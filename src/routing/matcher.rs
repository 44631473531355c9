//! Route pattern matching logic.
//!
//! # Responsibilities
//! - Compile a normalized pattern into literal and placeholder segments
//! - Match a normalized route segment by segment and extract placeholders
//! - Rebuild a concrete route from captured values
//!
//! # Design Decisions
//! - Segment counts must be equal: no trailing wildcards
//! - Literal segments compare case-sensitively
//! - Text around a placeholder must match literally; the placeholder itself
//!   captures greedily and may capture an empty string
//! - First mismatch aborts: no partial captures are returned

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder {
        name: String,
        prefix: String,
        suffix: String,
        /// `None` when the segment expression failed to compile; the whole
        /// route segment is then bound verbatim.
        matcher: Option<Regex>,
    },
}

impl Segment {
    fn parse(part: &str) -> Self {
        let Some(caps) = PLACEHOLDER.captures(part) else {
            return Segment::Literal(part.to_string());
        };

        // Group 0 and 1 always participate when the expression matched.
        let (whole, name) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(name)) => (whole, name.as_str()),
            _ => return Segment::Literal(part.to_string()),
        };

        let prefix = &part[..whole.start()];
        let suffix = &part[whole.end()..];
        let expression = format!(
            "(?s)^{}(.*){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        );

        Segment::Placeholder {
            name: name.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            matcher: Regex::new(&expression).ok(),
        }
    }
}

/// A registered route pattern, compiled for repeated matching.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile an already normalized pattern.
    pub fn parse(pattern: &str) -> Self {
        Self {
            raw: pattern.to_string(),
            segments: pattern.split('/').map(Segment::parse).collect(),
        }
    }

    /// The pattern text as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether any segment carries a placeholder.
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder { .. }))
    }

    /// Placeholder names in segment order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a normalized route, returning the placeholder values.
    pub fn matches(&self, route: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = route.split('/').collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = BTreeMap::new();

        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) => {
                    if text != part {
                        return None;
                    }
                }
                Segment::Placeholder { name, matcher, .. } => {
                    let value = match matcher {
                        Some(matcher) => matcher.captures(part)?.get(1)?.as_str(),
                        None => part,
                    };
                    captures.insert(name.clone(), value.to_string());
                }
            }
        }

        Some(captures)
    }

    /// Substitute `captures` into the pattern.
    ///
    /// Returns `None` when a placeholder has no captured value.
    pub fn reconstruct(&self, captures: &BTreeMap<String, String>) -> Option<String> {
        let parts = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Some(text.clone()),
                Segment::Placeholder {
                    name,
                    prefix,
                    suffix,
                    ..
                } => captures
                    .get(name)
                    .map(|value| format!("{prefix}{value}{suffix}")),
            })
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }
}

/// Match `route` against `pattern`, both already normalized.
///
/// Returns the placeholder values, or `None` when the route does not match.
pub fn dynamic_match(pattern: &str, route: &str) -> Option<BTreeMap<String, String>> {
    RoutePattern::parse(pattern).matches(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_match() {
        assert_eq!(
            dynamic_match("user/[name]", "user/john"),
            Some(map(&[("name", "john")]))
        );
    }

    #[test]
    fn test_multiple_placeholders() {
        assert_eq!(
            dynamic_match("page/[id]/comment/[user]", "page/123/comment/john"),
            Some(map(&[("id", "123"), ("user", "john")]))
        );
    }

    #[test]
    fn test_segment_count_mismatch() {
        assert_eq!(dynamic_match("user/[name]", "user/john/extra"), None);
        assert_eq!(dynamic_match("page/[id]/comment/[user]", "page/123/comment"), None);
    }

    #[test]
    fn test_literal_text_around_placeholder() {
        assert_eq!(dynamic_match("site-[number]", "site123"), None);
        assert_eq!(
            dynamic_match("site-[number]", "site-123"),
            Some(map(&[("number", "123")]))
        );
        assert_eq!(
            dynamic_match("post-[slug].json", "post-hello.json"),
            Some(map(&[("slug", "hello")]))
        );
        assert_eq!(dynamic_match("post-[slug].json", "post-helloxjson"), None);
    }

    #[test]
    fn test_literal_case_sensitive() {
        assert_eq!(dynamic_match("User/[name]", "user/john"), None);
        assert_eq!(dynamic_match("user/list", "user/list"), Some(BTreeMap::new()));
    }

    #[test]
    fn test_literal_mismatch_after_capture() {
        assert_eq!(dynamic_match("user/[name]/posts", "user/john/comments"), None);
    }

    #[test]
    fn test_placeholders_and_reconstruct() {
        let pattern = RoutePattern::parse("page/[id]/v-[rev]");
        assert!(pattern.is_dynamic());
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["id", "rev"]);

        let captures = pattern.matches("page/7/v-2").unwrap();
        assert_eq!(pattern.reconstruct(&captures).as_deref(), Some("page/7/v-2"));
        assert_eq!(pattern.reconstruct(&map(&[("id", "7")])), None);
    }

    #[test]
    fn test_placeholder_spans_newlines() {
        assert_eq!(
            dynamic_match("user/[name]", "user/jo\nhn"),
            Some(map(&[("name", "jo\nhn")]))
        );
        assert_eq!(
            dynamic_match("v-[rev]", "v-1\n2"),
            Some(map(&[("rev", "1\n2")]))
        );
    }

    #[test]
    fn test_static_pattern() {
        let pattern = RoutePattern::parse("about/team");
        assert!(!pattern.is_dynamic());
        assert_eq!(pattern.reconstruct(&BTreeMap::new()).as_deref(), Some("about/team"));
    }
}

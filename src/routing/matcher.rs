//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request method against a route's method
//! - Match the request path against an anchored regular expression
//! - Hand back the capture groups from that same match
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Patterns are compiled once at startup; a bad pattern fails startup
//! - A successful match yields its captures directly, so callers never run
//!   the expression twice

use std::fmt;

use axum::http::Method;
use regex::Regex;

/// The methods a route can be declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    /// Returns true if the request method is this route method.
    pub fn matches(&self, method: &Method) -> bool {
        match self {
            RouteMethod::Get => *method == Method::GET,
            RouteMethod::Post => *method == Method::POST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered substrings captured from a path.
///
/// Index 0 is the whole match; index 1 onwards are the capture groups in
/// pattern order. Groups that did not participate in the match are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCaptures(Vec<Option<String>>);

impl PathCaptures {
    pub fn new(captures: Vec<Option<String>>) -> Self {
        Self(captures)
    }

    /// Capture at `index`, if present and non-empty.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0
            .get(index)
            .and_then(|c| c.as_deref())
            .filter(|c| !c.is_empty())
    }

    /// The whole matched path.
    pub fn whole(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
}

impl PathPattern {
    /// Compile a path pattern. Patterns should be anchored with `^` and `$`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns true if the path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match the path and collect its captures in one pass.
    pub fn captures(&self, path: &str) -> Option<PathCaptures> {
        self.regex.captures(path).map(|caps| {
            PathCaptures::new(
                caps.iter()
                    .map(|m| m.map(|m| m.as_str().to_owned()))
                    .collect(),
            )
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_matcher() {
        assert!(RouteMethod::Get.matches(&Method::GET));
        assert!(!RouteMethod::Get.matches(&Method::POST));
        assert!(RouteMethod::Post.matches(&Method::POST));
        assert!(!RouteMethod::Post.matches(&Method::DELETE));
    }

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::new(r"^/posts$").unwrap();
        assert!(pattern.is_match("/posts"));
        assert!(!pattern.is_match("/posts/"));
        assert!(!pattern.is_match("/Posts")); // Case sensitive

        let caps = pattern.captures("/posts").unwrap();
        assert_eq!(caps.len(), 1);
        assert_eq!(caps.whole(), Some("/posts"));
        assert_eq!(caps.get(1), None);
    }

    #[test]
    fn test_capture_group() {
        let pattern = PathPattern::new(r"^/posts/([A-Za-z0-9_-]+)$").unwrap();

        let caps = pattern.captures("/posts/my_first-post2").unwrap();
        assert_eq!(caps.get(0), Some("/posts/my_first-post2"));
        assert_eq!(caps.get(1), Some("my_first-post2"));

        assert!(pattern.captures("/posts/").is_none());
        assert!(pattern.captures("/posts/a/b").is_none());
        assert!(pattern.captures("/posts/hello%20world").is_none());
    }

    #[test]
    fn test_optional_group_absent() {
        let pattern = PathPattern::new(r"^/posts(?:/([a-z]+))?$").unwrap();
        let caps = pattern.captures("/posts").unwrap();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps.get(1), None);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PathPattern::new(r"^/posts/(").is_err());
    }
}

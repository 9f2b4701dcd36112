//! URL patterns for mounted resources.

use paddock_router::Params;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A URL pattern such as `/books/{id}/`.
///
/// Segments in braces capture one path segment each. Empty segments are
/// ignored, so `/books/1` and `/books/1/` match the same pattern.
///
/// ```
/// use paddock_test::MountPattern;
///
/// let pattern = MountPattern::parse("/books/{id}/");
///
/// let params = pattern.matches("/books/7/").unwrap();
/// assert_eq!(params.get("id"), Some("7"));
/// assert!(pattern.matches("/books/").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPattern {
    source: String,
    segments: Vec<Segment>,
}

impl MountPattern {
    /// Parses a pattern.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Static(s.to_string()),
                }
            })
            .collect();
        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    /// Returns the captured parameters when `path` matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => params.push(name.clone(), part),
            }
        }
        Some(params)
    }

    /// Returns the parameter names, in order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for MountPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

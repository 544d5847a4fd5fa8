//! Request-target segment extraction.

/// A request-target split on `/`.
///
/// Segment `[1]` is the route key; segments `[2..]`, when present, are
/// rejoined with `/` into `rest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    pub key: Option<&'a str>,
    pub rest: Option<String>,
}

impl<'a> Segments<'a> {
    pub fn parse(target: &'a str) -> Self {
        let parts: Vec<&str> = target.split('/').collect();
        let key = parts.get(1).copied();
        let rest = (parts.len() > 2).then(|| parts[2..].join("/"));
        Self { key, rest }
    }

    /// `/` and nothing else.
    pub fn is_root(&self) -> bool {
        self.key == Some("") && self.rest.is_none()
    }

    /// The rejoined tail, or `""` when there is none.
    pub fn rest_or_empty(&self) -> &str {
        self.rest.as_deref().unwrap_or("")
    }
}

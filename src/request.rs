//! Request-side parameter handling.
//!
//! Path segments that survive route matching are folded into a [`Params`]
//! map using GET-style semantics: segments are chunked into
//! `(key, value)` pairs, and a trailing key with no value binds to the
//! boolean `true` sentinel ([`ParamValue::Flag`]). Parameters derived
//! from the path take priority over any seeded query parameters.

use smallvec::SmallVec;

/// Maximum number of parameters before heap allocation.
/// Most requests carry only a handful of path-derived parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the request hot path.
pub type ParamVec = SmallVec<[(String, ParamValue); MAX_INLINE_PARAMS]>;

/// A single request parameter value.
///
/// A path segment with no following value (an odd-length trailing
/// fragment) binds to [`ParamValue::Flag`], mirroring a bare GET-style
/// query key that is present but valueless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A textual value taken from the request path or query.
    Text(String),
    /// The boolean `true` sentinel for a key with no value.
    Flag,
}

impl ParamValue {
    /// The textual value, if this parameter has one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s.as_str()),
            ParamValue::Flag => None,
        }
    }

    /// Whether this parameter is the bare `true` sentinel.
    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self, ParamValue::Flag)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// An insertion-ordered parameter map with "last write wins" lookup.
///
/// Duplicate keys are allowed in storage; [`Params::get`] returns the
/// most recently pushed occurrence. This gives path-derived parameters
/// priority over seeded query parameters without an eager merge pass.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: ParamVec,
}

impl Params {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Later pushes shadow earlier ones on lookup.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Get a parameter by name, last write wins.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Get the textual value of a parameter, if present and textual.
    #[inline]
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Whether a parameter with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of stored entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fold path segments into this map as `(key, value)` pairs.
    ///
    /// Segments are consumed two at a time; an unpaired trailing
    /// segment binds its key to [`ParamValue::Flag`].
    pub fn extend_from_segments(&mut self, segments: &[&str]) {
        for pair in segments.chunks(2) {
            match pair {
                [key, value] => self.push(*key, *value),
                [key] => self.entries.push(((*key).to_string(), ParamValue::Flag)),
                _ => {}
            }
        }
    }
}

/// Break a raw request path into its non-empty segments.
///
/// An empty path resolves to the single segment `index`, so that the
/// bare site root dispatches to the default controller and action.
#[must_use]
pub fn tokenize_path(path: &str) -> Vec<&str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        vec!["index"]
    } else {
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_empty_segments() {
        assert_eq!(tokenize_path("/foo//bar/"), vec!["foo", "bar"]);
    }

    #[test]
    fn tokenize_empty_path_defaults_to_index() {
        assert_eq!(tokenize_path(""), vec!["index"]);
        assert_eq!(tokenize_path("/"), vec!["index"]);
    }

    #[test]
    fn pairwise_chunking_binds_trailing_key_to_flag() {
        let mut params = Params::new();
        params.extend_from_segments(&["my", "variables", "go", "here", "foobar"]);
        assert_eq!(params.text("my"), Some("variables"));
        assert_eq!(params.text("go"), Some("here"));
        assert_eq!(params.get("foobar"), Some(&ParamValue::Flag));
    }

    #[test]
    fn last_write_wins() {
        let mut params = Params::new();
        params.push("page", "1");
        params.push("page", "2");
        assert_eq!(params.text("page"), Some("2"));
        assert_eq!(params.len(), 2);
    }
}

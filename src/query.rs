//! Query string and resource path composition.
//!
//! [`QueryString`] keeps its parameters in insertion order so that the same
//! request always renders the same URI, which keeps logs and mock matchers
//! deterministic.

use std::fmt;

/// An ordered set of query parameters.
///
/// Keys are unique: adding a key that is already present replaces its value
/// in place, keeping the original position.
///
/// # Examples
///
/// ```
/// use issuu_client::query::QueryString;
///
/// let query = QueryString::new()
///     .add("assetType", "cover1")
///     .add_opt("documentPageNumber", None::<u32>)
///     .add("page", 2);
///
/// assert_eq!(query.to_string(), "?assetType=cover1&page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Creates an empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any existing value for the same key.
    pub fn add(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key.into(), value.to_string());
        self
    }

    /// Adds a parameter only when a value is present.
    pub fn add_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.add(key, value),
            None => self,
        }
    }

    /// Adds a boolean parameter rendered as `true`/`false`.
    pub fn add_flag(self, key: impl Into<String>, value: bool) -> Self {
        self.add(key, if value { "true" } else { "false" })
    }

    pub(crate) fn set(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the encoded pairs without the leading `?`, or `None` when empty.
    pub fn encoded(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }

        let encoded = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Some(encoded)
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoded() {
            Some(encoded) => write!(f, "?{encoded}"),
            None => Ok(()),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(QueryString::new(), |query, (k, v)| query.add(k, v))
    }
}

/// Joins two path segments with exactly one `/` between them.
///
/// A single trailing slash is trimmed from `parent` and a single leading slash
/// from `child`. If either side is empty the two are concatenated unchanged.
///
/// # Examples
///
/// ```
/// use issuu_client::query::join_paths;
///
/// assert_eq!(join_paths("/v2/", "/drafts"), "/v2/drafts");
/// assert_eq!(join_paths("/", "/drafts"), "/drafts");
/// assert_eq!(join_paths("", "/drafts"), "/drafts");
/// ```
pub fn join_paths(parent: &str, child: &str) -> String {
    if parent.is_empty() || child.is_empty() {
        return format!("{parent}{child}");
    }

    let parent = parent.strip_suffix('/').unwrap_or(parent);
    let child = child.strip_prefix('/').unwrap_or(child);
    format!("{parent}/{child}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_renders_nothing() {
        let query = QueryString::new();
        assert_eq!(query.to_string(), "");
        assert_eq!(query.encoded(), None);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let query = QueryString::new()
            .add_opt("width", Some("100%"))
            .add_opt("height", None::<&str>);

        assert_eq!(query.len(), 1);
        assert_eq!(query.to_string(), "?width=100%25");
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let query = QueryString::new()
            .add("a", 1)
            .add("b", 2)
            .add("a", 3);

        assert_eq!(query.to_string(), "?a=3&b=2");
    }

    #[test]
    fn test_components_are_percent_encoded() {
        let query = QueryString::new().add("desired name", "a&b=c d");
        assert_eq!(query.to_string(), "?desired%20name=a%26b%3Dc%20d");
    }

    #[test]
    fn test_flags_render_lowercase() {
        let query = QueryString::new()
            .add_flag("responsive", true)
            .add_flag("hideIssuuLogo", false);
        assert_eq!(query.get("responsive"), Some("true"));
        assert_eq!(query.get("hideIssuuLogo"), Some("false"));
    }

    #[test]
    fn test_join_paths_single_separator() {
        assert_eq!(join_paths("/v2", "drafts"), "/v2/drafts");
        assert_eq!(join_paths("/v2/", "/drafts"), "/v2/drafts");
        assert_eq!(join_paths("/v2", "/drafts/slug/upload"), "/v2/drafts/slug/upload");
    }

    #[test]
    fn test_join_paths_trims_only_one_slash() {
        assert_eq!(join_paths("/v2//", "//drafts"), "/v2///drafts");
    }

    #[test]
    fn test_join_paths_empty_side() {
        assert_eq!(join_paths("/v2", ""), "/v2");
        assert_eq!(join_paths("", ""), "");
    }
}

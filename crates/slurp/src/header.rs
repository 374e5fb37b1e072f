//! Response header access.

use mime::Mime;

/// An ordered collection of response headers.
///
/// Preserves insertion order and duplicate names; lookup is
/// case-insensitive. This is the minimal view the accumulator needs,
/// independent of any particular client library's header type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header. Existing headers with the same name are kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The parsed `Content-Type`, if present and well formed.
    pub fn content_type(&self) -> Option<Mime> {
        self.get("content-type")?.parse().ok()
    }

    /// The `charset` parameter of the `Content-Type`, if declared.
    pub fn charset(&self) -> Option<String> {
        self.content_type()?
            .get_param(mime::CHARSET)
            .map(|name| name.as_str().to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "text/html");

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(headers.get("x-missing"), None);
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let mut headers = HeaderMap::new();
        headers.insert("Set-Cookie", "a=1");
        headers.insert("Set-Cookie", "b=2");

        assert_eq!(headers.get("set-cookie"), Some("a=1"));
        assert_eq!(headers.get_all("set-cookie"), vec!["a=1", "b=2"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn charset_from_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "text/plain; charset=utf-8");

        assert_eq!(headers.charset().as_deref(), Some("utf-8"));
    }

    #[test]
    fn charset_absent_when_not_declared() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "application/octet-stream");

        assert_eq!(headers.content_type(), Some(mime::APPLICATION_OCTET_STREAM));
        assert_eq!(headers.charset(), None);
    }

    #[test]
    fn malformed_content_type_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "not a mime type at all;;;");

        assert_eq!(headers.content_type(), None);
        assert_eq!(headers.charset(), None);
    }

    #[test]
    fn from_iterator() {
        let headers: HeaderMap = vec![
            ("Server".to_string(), "slurp-test".to_string()),
            ("Content-Length".to_string(), "0".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(headers.get("server"), Some("slurp-test"));
        assert!(!headers.is_empty());
    }
}

//! Ordered query-string map with `URLSearchParams` semantics.
//!
//! Used both by the handlers (as an extractor) and by the listing controllers,
//! which treat the URL as the source of truth across navigations.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parse an `application/x-www-form-urlencoded` string; a leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Replace the first occurrence in place and drop the rest, or append.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryString
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.query().map(QueryString::parse).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_value() {
        let q = QueryString::parse("?a=1&b=2&a=3");
        assert_eq!(q.get("a"), Some("1"));
        assert_eq!(q.get("missing"), None);
        assert!(q.contains("b"));
    }

    #[test]
    fn set_keeps_position_and_collapses_duplicates() {
        let mut q = QueryString::parse("a=1&b=2&a=3&c=4");
        q.set("a", "9");
        assert_eq!(q.to_string(), "a=9&b=2&c=4");
        q.set("d", "x y");
        assert_eq!(q.to_string(), "a=9&b=2&c=4&d=x+y");
    }

    #[test]
    fn delete_removes_all_occurrences() {
        let mut q = QueryString::parse("page=2&x=1&page=3");
        q.delete("page");
        assert_eq!(q.to_string(), "x=1");
        q.delete("x");
        assert!(q.is_empty());
    }

    #[test]
    fn decoding_round_trips_special_characters() {
        let q = QueryString::parse("search=S%C3%A3o+Paulo&amenities=pool%2Cgrill");
        assert_eq!(q.get("search"), Some("São Paulo"));
        assert_eq!(q.get("amenities"), Some("pool,grill"));
        assert_eq!(q.keys().collect::<Vec<_>>(), vec!["search", "amenities"]);
    }
}

//! Depth-first structural search

use crate::strategy::ExtractionStrategy;
use crate::text::url_in_text;
use serde_json::{Map, Value};

/// Field names checked before any other field of an object
pub const DEFAULT_PRIORITY_KEYS: &[&str] = &[
    "url", "image", "img", "imageUrl", "src", "href", "link", "output", "result",
];

/// Depth-first search for a URL
///
/// - strings are tested directly;
/// - arrays are searched element by element;
/// - objects first test their priority keys (string values only), then
///   descend into every nested object or array in document order.
///
/// Non-priority string fields are never inspected, so a stray link in a
/// `debug` or `msg` field does not shadow the real artifact.
#[derive(Debug, Clone)]
pub struct StructuralSearch {
    priority_keys: Vec<String>,
    max_depth: usize,
}

impl StructuralSearch {
    /// Create search with custom priority keys
    #[must_use]
    pub fn new<I, S>(priority_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            priority_keys: priority_keys.into_iter().map(Into::into).collect(),
            max_depth: 64,
        }
    }

    /// Limit nesting depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Priority keys in check order
    #[inline]
    #[must_use]
    pub fn priority_keys(&self) -> &[String] {
        &self.priority_keys
    }

    /// Search a value
    #[must_use]
    pub fn search(&self, value: &Value) -> Option<String> {
        self.search_at(value, 0)
    }

    fn search_at(&self, value: &Value, depth: usize) -> Option<String> {
        if depth > self.max_depth {
            return None;
        }
        match value {
            Value::String(s) => url_in_text(s),
            Value::Array(items) => items.iter().find_map(|item| self.search_at(item, depth + 1)),
            Value::Object(map) => self.search_object(map, depth),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    fn search_object(&self, map: &Map<String, Value>, depth: usize) -> Option<String> {
        let prioritised = self.priority_keys.iter().find_map(|key| match map.get(key) {
            Some(Value::String(s)) if !s.is_empty() => url_in_text(s),
            _ => None,
        });
        if prioritised.is_some() {
            return prioritised;
        }

        map.values()
            .filter(|v| v.is_object() || v.is_array())
            .find_map(|v| self.search_at(v, depth + 1))
    }
}

impl Default for StructuralSearch {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_KEYS.iter().copied())
    }
}

impl ExtractionStrategy for StructuralSearch {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract(&self, response: &Value) -> Option<String> {
        self.search(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search(value: &Value) -> Option<String> {
        StructuralSearch::default().search(value)
    }

    #[test]
    fn nested_image_field() {
        let value = json!({"data": {"image": "https://x/y.png"}});
        assert_eq!(search(&value).as_deref(), Some("https://x/y.png"));
    }

    #[test]
    fn priority_keys_checked_before_nested_objects() {
        let value = json!({
            "meta": {"url": "https://nested.io/a.png"},
            "output": "https://top.io/b.png"
        });
        assert_eq!(search(&value).as_deref(), Some("https://top.io/b.png"));
    }

    #[test]
    fn priority_order_within_object() {
        let value = json!({"link": "https://link.io", "url": "https://url.io"});
        assert_eq!(search(&value).as_deref(), Some("https://url.io"));
    }

    #[test]
    fn url_embedded_in_priority_string() {
        let value = json!({"output": "rendered at https://x.io/r.png ok"});
        assert_eq!(search(&value).as_deref(), Some("https://x.io/r.png"));
    }

    #[test]
    fn non_priority_strings_are_skipped() {
        let value = json!({"msg": "see https://docs.io", "code": 0});
        assert_eq!(search(&value), None);
    }

    #[test]
    fn arrays_searched_in_order() {
        let value = json!({"items": [{"name": "a"}, {"src": "https://one.io"}, {"src": "https://two.io"}]});
        assert_eq!(search(&value).as_deref(), Some("https://one.io"));
    }

    #[test]
    fn bare_string_in_array() {
        let value = json!(["nothing here", "https://x.io/p.gif"]);
        assert_eq!(search(&value).as_deref(), Some("https://x.io/p.gif"));
    }

    #[test]
    fn document_order_preserved_for_nested_objects() {
        let value: Value =
            serde_json::from_str(r#"{"z": {"url": "https://z.io"}, "a": {"url": "https://a.io"}}"#).unwrap();
        assert_eq!(search(&value).as_deref(), Some("https://z.io"));
    }

    #[test]
    fn scalars_yield_nothing() {
        assert_eq!(search(&json!(null)), None);
        assert_eq!(search(&json!(0)), None);
        assert_eq!(search(&json!(false)), None);
        assert_eq!(search(&json!("")), None);
    }

    #[test]
    fn depth_limit_stops_descent() {
        let value = json!({"a": {"b": {"url": "https://deep.io"}}});
        let shallow = StructuralSearch::default().with_max_depth(1);
        assert_eq!(shallow.search(&value), None);
        let deep = StructuralSearch::default().with_max_depth(2);
        assert_eq!(deep.search(&value).as_deref(), Some("https://deep.io"));
    }

    #[test]
    fn custom_priority_keys() {
        let value = json!({"poster": "https://p.io", "url": "https://u.io"});
        let search = StructuralSearch::new(["poster"]);
        assert_eq!(search.search(&value).as_deref(), Some("https://p.io"));
    }
}

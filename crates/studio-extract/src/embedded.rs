//! String-encoded payload handling
//!
//! Workflow runs commonly return their output as a JSON document serialized
//! into a string field (`{"code":0,"data":"{\"output\":\"…\"}"}`).

use crate::strategy::ExtractionStrategy;
use crate::structural::StructuralSearch;
use crate::text::url_in_text;
use serde_json::Value;

/// Look inside a string-valued top-level field
///
/// The string is first scanned for a URL directly; failing that it is parsed
/// as JSON and searched structurally.
#[derive(Debug, Clone)]
pub struct EmbeddedPayload {
    field: String,
    inner: StructuralSearch,
}

impl EmbeddedPayload {
    /// Create for a given top-level field
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            inner: StructuralSearch::default(),
        }
    }

    /// Use a custom structural search on the decoded payload
    #[inline]
    #[must_use]
    pub fn with_search(mut self, inner: StructuralSearch) -> Self {
        self.inner = inner;
        self
    }
}

impl Default for EmbeddedPayload {
    fn default() -> Self {
        Self::new("data")
    }
}

impl ExtractionStrategy for EmbeddedPayload {
    fn name(&self) -> &'static str {
        "embedded_payload"
    }

    fn extract(&self, response: &Value) -> Option<String> {
        let payload = response.get(&self.field)?.as_str()?;

        if let Some(url) = url_in_text(payload) {
            return Some(url);
        }

        match serde_json::from_str::<Value>(payload) {
            Ok(decoded) => self.inner.search(&decoded),
            Err(e) => {
                tracing::trace!(field = %self.field, error = %e, "payload is not json");
                None
            }
        }
    }
}

//! Last-resort scan of the serialized response

use crate::strategy::ExtractionStrategy;
use crate::text::{all_urls, looks_like_image};
use serde_json::Value;

/// Serialize the whole response and take the first image-like URL
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTextScan;

impl ExtractionStrategy for FullTextScan {
    fn name(&self) -> &'static str {
        "full_text"
    }

    fn extract(&self, response: &Value) -> Option<String> {
        let text = response.to_string();
        let found = all_urls(&text).find(|url| looks_like_image(url)).map(str::to_string);
        found
    }
}

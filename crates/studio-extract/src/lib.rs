//! Studio response extraction
//!
//! Locates the generated artifact's URL inside an arbitrarily shaped workflow
//! response.
//!
//! # Core Concepts
//!
//! - [`ExtractionStrategy`]: one heuristic for finding a URL
//! - [`StructuralSearch`]: depth-first search with priority field names
//! - [`EmbeddedPayload`]: URL or JSON document hidden in a string field
//! - [`FullTextScan`]: image-like URL anywhere in the serialized response
//! - [`ExtractorChain`]: ordered fallback over strategies
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use studio_extract::ExtractorChain;
//!
//! let chain = ExtractorChain::with_defaults();
//! let found = chain.extract(&json!({"data": {"image": "https://x/y.png"}})).unwrap();
//! assert_eq!(found.url, "https://x/y.png");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod embedded;
mod full_text;
mod strategy;
mod structural;
pub mod text;

pub use embedded::EmbeddedPayload;
pub use full_text::FullTextScan;
pub use strategy::{ExtractedArtifact, ExtractionStrategy, ExtractorChain};
pub use structural::{StructuralSearch, DEFAULT_PRIORITY_KEYS};

/// Run the default chain over a response
#[must_use]
pub fn extract_artifact(response: &serde_json::Value) -> Option<ExtractedArtifact> {
    ExtractorChain::with_defaults().extract(response)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

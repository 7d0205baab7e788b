//! Extraction strategy trait and the ordered chain that runs them
//!
//! The remote workflow's output schema is not stable, so the artifact URL is
//! located by a fixed sequence of heuristics. Each heuristic is an
//! [`ExtractionStrategy`]; the [`ExtractorChain`] tries them in order and the
//! first hit wins.

use crate::embedded::EmbeddedPayload;
use crate::full_text::FullTextScan;
use crate::structural::StructuralSearch;
use serde::Serialize;
use serde_json::Value;

/// One way of finding an artifact URL in a response
///
/// Implementations must be deterministic: the same input always yields the
/// same output, and they must never panic on arbitrary JSON.
pub trait ExtractionStrategy: Send + Sync {
    /// Strategy name (for logging and results)
    fn name(&self) -> &'static str;

    /// Try to find a URL in the response
    fn extract(&self, response: &Value) -> Option<String>;
}

/// URL located in a workflow response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedArtifact {
    /// Artifact URL
    pub url: String,
    /// Name of the strategy that found it
    pub strategy: &'static str,
}

/// Ordered fallback chain of extraction strategies
pub struct ExtractorChain {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractorChain {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Create chain with the built-in strategies
    ///
    /// Order: structural search, embedded string payload, full-text scan.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with(StructuralSearch::default())
            .with(EmbeddedPayload::default())
            .with(FullTextScan)
    }

    /// Append a strategy (builder form)
    #[inline]
    #[must_use]
    pub fn with<S: ExtractionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.push(strategy);
        self
    }

    /// Append a strategy
    #[inline]
    pub fn push<S: ExtractionStrategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
    }

    /// Insert a strategy at a position (clamped to the chain length)
    pub fn insert<S: ExtractionStrategy + 'static>(&mut self, index: usize, strategy: S) {
        let index = index.min(self.strategies.len());
        self.strategies.insert(index, Box::new(strategy));
    }

    /// Strategy names in execution order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if chain is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run the chain
    ///
    /// Returns `None` when no strategy finds a URL; callers must treat that as
    /// "no artifact" rather than guess.
    #[must_use]
    pub fn extract(&self, response: &Value) -> Option<ExtractedArtifact> {
        for strategy in &self.strategies {
            if let Some(url) = strategy.extract(response) {
                tracing::debug!(strategy = strategy.name(), %url, "artifact url found");
                return Some(ExtractedArtifact {
                    url,
                    strategy: strategy.name(),
                });
            }
            tracing::trace!(strategy = strategy.name(), "no match");
        }
        tracing::debug!("no artifact url in response");
        None
    }
}

impl Default for ExtractorChain {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ExtractorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorChain")
            .field("strategies", &self.names())
            .finish()
    }
}

//! Workflow routing
//!
//! Maps a template or scenario identifier to the remote workflow that renders it.
//! Resolution is total: an unknown template falls through to its scenario, and
//! an unknown scenario falls through to the default workflow.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Remote workflow identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(pub String);

impl WorkflowId {
    /// Create new workflow ID
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for an empty identifier
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkflowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WorkflowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Workflow lookup table keyed by template, then scenario
///
/// The built-in routes apply only when the whole section is absent; tables
/// missing from a supplied section start empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRoutes {
    /// Template-specific workflows (checked first)
    #[serde(default)]
    pub templates: IndexMap<String, WorkflowId>,
    /// Scenario-wide workflows
    #[serde(default)]
    pub scenarios: IndexMap<String, WorkflowId>,
    /// Fallback when neither table matches
    #[serde(default = "default_workflow")]
    pub default: WorkflowId,
}

impl WorkflowRoutes {
    /// Create routes with only a default workflow
    #[inline]
    #[must_use]
    pub fn new(default: impl Into<WorkflowId>) -> Self {
        Self {
            templates: IndexMap::new(),
            scenarios: IndexMap::new(),
            default: default.into(),
        }
    }

    /// Route a template to a workflow
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>, id: impl Into<WorkflowId>) -> Self {
        self.templates.insert(template.into(), id.into());
        self
    }

    /// Route a scenario to a workflow
    #[inline]
    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<String>, id: impl Into<WorkflowId>) -> Self {
        self.scenarios.insert(scenario.into(), id.into());
        self
    }

    /// Resolve the workflow for a scenario and optional template
    ///
    /// Precedence: template table, scenario table, default.
    #[must_use]
    pub fn resolve(&self, scenario: &str, template: Option<&str>) -> &WorkflowId {
        template
            .and_then(|t| self.templates.get(t))
            .or_else(|| self.scenarios.get(scenario))
            .unwrap_or(&self.default)
    }
}

fn default_workflow() -> WorkflowId {
    WorkflowId::new(crate::defaults::DEFAULT_WORKFLOW_ID)
}

impl Default for WorkflowRoutes {
    fn default() -> Self {
        crate::defaults::workflow_routes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> WorkflowRoutes {
        WorkflowRoutes::new("fallback")
            .with_scenario("poster", "poster-wf")
            .with_template("poster-1", "poster-1-wf")
    }

    #[test]
    fn template_wins_over_scenario() {
        assert_eq!(routes().resolve("poster", Some("poster-1")).as_str(), "poster-1-wf");
    }

    #[test]
    fn unknown_template_falls_back_to_scenario() {
        assert_eq!(routes().resolve("poster", Some("poster-9")).as_str(), "poster-wf");
        assert_eq!(routes().resolve("poster", None).as_str(), "poster-wf");
    }

    #[test]
    fn unknown_scenario_falls_back_to_default() {
        assert_eq!(routes().resolve("banner", None).as_str(), "fallback");
        assert_eq!(routes().resolve("banner", Some("banner-1")).as_str(), "fallback");
    }

    #[test]
    fn template_route_applies_across_scenarios() {
        // Templates are globally unique, so the scenario is irrelevant once one matches
        assert_eq!(routes().resolve("banner", Some("poster-1")).as_str(), "poster-1-wf");
    }

    #[test]
    fn workflow_id_serializes_transparently() {
        let json = serde_json::to_string(&WorkflowId::new("123")).unwrap();
        assert_eq!(json, "\"123\"");
    }
}

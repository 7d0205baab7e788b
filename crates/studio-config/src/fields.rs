//! Per-template input field schemas
//!
//! Each workflow expects a fixed set of named inputs. A schema lists them in the
//! order they are presented and sent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of value a field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, sent verbatim
    #[serde(alias = "textarea")]
    Text,
    /// Uploaded file, sent as a file reference
    #[serde(alias = "image")]
    File,
}

impl FieldKind {
    /// Check if the field takes an uploaded file
    #[inline]
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::File => f.write_str("file"),
        }
    }
}

/// One workflow input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Parameter name expected by the workflow
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Value kind
    pub kind: FieldKind,
    /// Hint shown while empty
    #[serde(default)]
    pub placeholder: String,
}

impl FieldSpec {
    /// Create text field
    #[must_use]
    pub fn text(id: impl Into<String>, label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::Text,
            placeholder: placeholder.into(),
        }
    }

    /// Create file field
    #[must_use]
    pub fn file(id: impl Into<String>, label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::File,
            placeholder: placeholder.into(),
        }
    }
}

/// Field schemas keyed by template, with scenario defaults
///
/// The built-in catalog applies only when the whole section is absent; keys
/// missing from a supplied section start empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchemas {
    /// Template-specific schemas
    #[serde(default)]
    pub templates: IndexMap<String, Vec<FieldSpec>>,
    /// Scenario → template whose schema the scenario borrows
    #[serde(default)]
    pub scenario_defaults: IndexMap<String, String>,
    /// Schema used when nothing else matches
    #[serde(default)]
    pub default: Vec<FieldSpec>,
}

impl FieldSchemas {
    /// Create schemas with only a default field list
    #[inline]
    #[must_use]
    pub fn new(default: Vec<FieldSpec>) -> Self {
        Self {
            templates: IndexMap::new(),
            scenario_defaults: IndexMap::new(),
            default,
        }
    }

    /// Register a template schema
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        self.templates.insert(template.into(), fields);
        self
    }

    /// Make a scenario borrow a template's schema
    #[inline]
    #[must_use]
    pub fn with_scenario_default(mut self, scenario: impl Into<String>, template: impl Into<String>) -> Self {
        self.scenario_defaults.insert(scenario.into(), template.into());
        self
    }

    /// Resolve the fields for a scenario and optional template
    ///
    /// Precedence: template schema, scenario default, default schema.
    #[must_use]
    pub fn resolve(&self, scenario: &str, template: Option<&str>) -> &[FieldSpec] {
        template
            .and_then(|t| self.templates.get(t))
            .or_else(|| {
                self.scenario_defaults
                    .get(scenario)
                    .and_then(|t| self.templates.get(t))
            })
            .unwrap_or(&self.default)
    }

    /// Check schema consistency
    ///
    /// Returns a description of the first problem found.
    pub(crate) fn check(&self) -> Result<(), String> {
        let all = self
            .templates
            .iter()
            .map(|(name, fields)| (name.as_str(), fields))
            .chain(std::iter::once(("default", &self.default)));

        for (name, fields) in all {
            let mut seen = HashSet::new();
            for field in fields {
                if field.id.trim().is_empty() {
                    return Err(format!("schema '{name}' has a field with an empty id"));
                }
                if !seen.insert(field.id.as_str()) {
                    return Err(format!("schema '{name}' declares field '{}' twice", field.id));
                }
            }
        }

        for (scenario, template) in &self.scenario_defaults {
            if !self.templates.contains_key(template) {
                return Err(format!(
                    "scenario '{scenario}' defaults to unknown template '{template}'"
                ));
            }
        }

        Ok(())
    }
}

impl Default for FieldSchemas {
    fn default() -> Self {
        crate::defaults::field_schemas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schemas() -> FieldSchemas {
        FieldSchemas::new(vec![FieldSpec::text("prompt", "Prompt", "")])
            .with_template("t1", vec![FieldSpec::text("input", "Input", ""), FieldSpec::file("logo", "Logo", "")])
            .with_template("t2", vec![FieldSpec::file("a", "A", "")])
            .with_scenario_default("poster", "t1")
    }

    #[test]
    fn template_schema_wins() {
        let fields = schemas();
        let resolved = fields.resolve("poster", Some("t2"));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "a");
    }

    #[test]
    fn scenario_default_used_for_unknown_template() {
        let fields = schemas();
        let resolved = fields.resolve("poster", Some("unknown"));
        assert_eq!(resolved[0].id, "input");
    }

    #[test]
    fn default_schema_is_last_resort() {
        let fields = schemas();
        assert_eq!(fields.resolve("banner", None)[0].id, "prompt");
    }

    #[test]
    fn kind_accepts_editor_aliases() {
        let kind: FieldKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(kind, FieldKind::File);
        let kind: FieldKind = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(kind, FieldKind::Text);
    }

    #[test]
    fn check_rejects_duplicate_ids() {
        let fields = FieldSchemas::new(vec![
            FieldSpec::text("prompt", "A", ""),
            FieldSpec::text("prompt", "B", ""),
        ]);
        let err = fields.check().unwrap_err();
        assert!(err.contains("twice"));
    }

    #[test]
    fn check_rejects_dangling_scenario_default() {
        let fields = FieldSchemas::new(vec![]).with_scenario_default("poster", "missing");
        assert!(fields.check().unwrap_err().contains("unknown template"));
    }
}

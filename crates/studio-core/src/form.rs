//! Form state and parameter mapping

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use studio_client::{FileReference, ParameterValue, Parameters, UploadedFile};
use studio_config::{FieldKind, FieldSpec};

/// Scenario and optional template the user is working in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Scenario id (e.g. `poster`)
    pub scenario: String,
    /// Template id (e.g. `poster-promotion-1`)
    #[serde(default)]
    pub template: Option<String>,
}

impl Selection {
    /// Select a scenario with no template
    #[inline]
    #[must_use]
    pub fn scenario(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            template: None,
        }
    }

    /// With template
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Template as `&str`
    #[inline]
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

/// Value entered for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Typed text
    Text(String),
    /// Uploaded file
    File(UploadedFile),
}

impl FieldValue {
    /// Check for a value that would send nothing
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::File(file) => file.file_id.trim().is_empty(),
        }
    }

    fn to_parameter(&self, kind: FieldKind) -> ParameterValue {
        match (self, kind) {
            (Self::Text(text), FieldKind::Text) => ParameterValue::Text(text.clone()),
            (Self::Text(file_id), FieldKind::File) => ParameterValue::File(FileReference::new(file_id.trim())),
            (Self::File(file), FieldKind::File) => ParameterValue::File(file.reference()),
            (Self::File(file), FieldKind::Text) => ParameterValue::Text(file.file_id.clone()),
        }
    }
}

impl From<UploadedFile> for FieldValue {
    fn from(file: UploadedFile) -> Self {
        Self::File(file)
    }
}

/// Values entered for the template being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: IndexMap<String, FieldValue>,
}

impl FormState {
    /// Create empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text value
    pub fn set_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), FieldValue::Text(value.into()));
    }

    /// With a text value
    #[must_use]
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_text(field, value);
        self
    }

    /// Attach an uploaded file
    pub fn attach_file(&mut self, field: impl Into<String>, file: UploadedFile) {
        self.values.insert(field.into(), FieldValue::File(file));
    }

    /// Value of a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Remove a field's value
    pub fn clear(&mut self, field: &str) -> Option<FieldValue> {
        self.values.shift_remove(field)
    }

    /// Number of fields with a value
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no field has a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Workflow parameters for a schema
    ///
    /// Follows schema order and skips fields that are missing or blank.
    /// Fields not in the schema are ignored.
    #[must_use]
    pub fn to_parameters(&self, fields: &[FieldSpec]) -> Parameters {
        fields
            .iter()
            .filter_map(|spec| {
                let value = self.values.get(&spec.id).filter(|v| !v.is_blank())?;
                Some((spec.id.clone(), value.to_parameter(spec.kind)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn uploaded(id: &str) -> UploadedFile {
        UploadedFile {
            file_id: id.to_string(),
            file_name: "logo.png".to_string(),
        }
    }

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("input", "Headline", ""),
            FieldSpec::file("logo", "Logo", ""),
            FieldSpec::text("tagline", "Tagline", ""),
        ]
    }

    #[test]
    fn parameters_follow_schema_order() {
        let mut form = FormState::new();
        form.set_text("tagline", "fresh");
        form.attach_file("logo", uploaded("file_9"));
        form.set_text("input", "Summer");

        let params = form.to_parameters(&schema());
        let keys: Vec<_> = params.keys().cloned().collect();
        assert_eq!(keys, vec!["input", "logo", "tagline"]);
        assert_eq!(params["logo"], ParameterValue::File(FileReference::new("file_9")));
    }

    #[test]
    fn blank_and_unknown_values_are_omitted() {
        let form = FormState::new()
            .with_text("input", "   ")
            .with_text("not-in-schema", "x")
            .with_text("tagline", "ok");

        let params = form.to_parameters(&schema());
        assert_eq!(params.len(), 1);
        assert_eq!(params["tagline"], ParameterValue::from("ok"));
    }

    #[test]
    fn kind_mismatches_are_coerced() {
        let mut form = FormState::new();
        form.set_text("logo", "file_raw");
        form.attach_file("input", uploaded("file_1"));

        let params = form.to_parameters(&schema());
        assert_eq!(params["logo"], ParameterValue::File(FileReference::new("file_raw")));
        assert_eq!(params["input"], ParameterValue::from("file_1"));
    }

    #[test]
    fn clear_removes_value() {
        let mut form = FormState::new().with_text("input", "x");
        assert!(form.clear("input").is_some());
        assert!(form.is_empty());
        assert!(form.get("input").is_none());
    }

    #[test]
    fn selection_builder() {
        let selection = Selection::scenario("poster").with_template("poster-promotion-1");
        assert_eq!(selection.template(), Some("poster-promotion-1"));
        assert_eq!(Selection::scenario("banner").template(), None);
    }
}

//! Workflow request and result types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_config::WorkflowId;

/// Reference to a previously uploaded file
///
/// Serialized as `{"type": "file", "file_id": "…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename = "file")]
pub struct FileReference {
    /// Identifier assigned by the upload endpoint
    pub file_id: String,
}

impl FileReference {
    /// Create file reference
    #[inline]
    #[must_use]
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

/// Value of one workflow parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Literal text
    Text(String),
    /// Uploaded file
    File(FileReference),
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileReference> for ParameterValue {
    fn from(value: FileReference) -> Self {
        Self::File(value)
    }
}

/// Ordered parameter map, field id → value
pub type Parameters = IndexMap<String, ParameterValue>;

/// One generation attempt's input
///
/// Immutable once built; retries resend the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    workflow_id: WorkflowId,
    parameters: Parameters,
}

impl WorkflowRequest {
    /// Create request
    #[inline]
    #[must_use]
    pub fn new(workflow_id: impl Into<WorkflowId>, parameters: Parameters) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            parameters,
        }
    }

    /// Start a request with no parameters
    #[inline]
    #[must_use]
    pub fn builder(workflow_id: impl Into<WorkflowId>) -> WorkflowRequestBuilder {
        WorkflowRequestBuilder {
            workflow_id: workflow_id.into(),
            parameters: Parameters::new(),
        }
    }

    /// Target workflow
    #[inline]
    #[must_use]
    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    /// Parameters in insertion order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Wire payload: `{"workflow_id": …, "parameters": {…}}`
    #[must_use]
    pub fn to_payload(&self) -> Value {
        serde_json::json!({
            "workflow_id": self.workflow_id,
            "parameters": self.parameters,
        })
    }
}

/// Builder for [`WorkflowRequest`]
#[derive(Debug, Clone)]
pub struct WorkflowRequestBuilder {
    workflow_id: WorkflowId,
    parameters: Parameters,
}

impl WorkflowRequestBuilder {
    /// Add a text parameter
    #[must_use]
    pub fn text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(field.into(), ParameterValue::Text(value.into()));
        self
    }

    /// Add a file parameter
    #[must_use]
    pub fn file(mut self, field: impl Into<String>, file_id: impl Into<String>) -> Self {
        self.parameters
            .insert(field.into(), ParameterValue::File(FileReference::new(file_id)));
        self
    }

    /// Finish
    #[must_use]
    pub fn build(self) -> WorkflowRequest {
        WorkflowRequest::new(self.workflow_id, self.parameters)
    }
}

/// Successful invocation output
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Workflow that produced the response
    pub workflow_id: WorkflowId,
    /// Response body as returned by the service
    pub raw_response: Value,
}

impl WorkflowResult {
    /// Build from a response, preferring the workflow id the service echoes back
    #[must_use]
    pub fn from_response(requested: &WorkflowId, raw_response: Value) -> Self {
        let workflow_id = raw_response
            .get("workflow_id")
            .and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(WorkflowId::new(s.as_str())),
                Value::Number(n) => Some(WorkflowId::new(n.to_string())),
                _ => None,
            })
            .unwrap_or_else(|| requested.clone());

        Self {
            workflow_id,
            raw_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn payload_shape() {
        let request = WorkflowRequest::builder("wf-1")
            .text("input", "summer sale")
            .file("logo", "file_42")
            .build();

        assert_eq!(
            request.to_payload(),
            json!({
                "workflow_id": "wf-1",
                "parameters": {
                    "input": "summer sale",
                    "logo": {"type": "file", "file_id": "file_42"}
                }
            })
        );
    }

    #[test]
    fn payload_preserves_parameter_order() {
        let request = WorkflowRequest::builder("wf")
            .text("z", "1")
            .text("a", "2")
            .build();
        let text = request.to_payload().to_string();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[test]
    fn parameter_value_roundtrips_untagged() {
        let file: ParameterValue = serde_json::from_value(json!({"type": "file", "file_id": "f"})).unwrap();
        assert_eq!(file, ParameterValue::File(FileReference::new("f")));
        let text: ParameterValue = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(text, ParameterValue::from("hello"));
    }

    #[test]
    fn result_prefers_echoed_workflow_id() {
        let requested = WorkflowId::new("asked");
        let echoed = WorkflowResult::from_response(&requested, json!({"workflow_id": "answered"}));
        assert_eq!(echoed.workflow_id.as_str(), "answered");

        let missing = WorkflowResult::from_response(&requested, json!({"data": "x"}));
        assert_eq!(missing.workflow_id.as_str(), "asked");
    }
}

//! Testing utilities for the Studio workspace
//!
//! Scripted transport, response fixtures and config helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studio_client::{FilePart, TransportError, TransportResponse, WorkflowTransport};
use studio_config::{EndpointConfig, RetryPolicy, StudioConfig};
use tokio::time::Instant;

pub const WORKFLOW_URL: &str = "https://studio.test/v1/workflow/run";
pub const UPLOAD_URL: &str = "https://studio.test/v1/files/upload";

pub type Scripted = Result<TransportResponse, TransportError>;

/// One request seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Json { url: String, body: Value, at: Instant },
    File { url: String, file: FilePart, at: Instant },
}

impl RecordedCall {
    pub fn url(&self) -> &str {
        match self {
            Self::Json { url, .. } | Self::File { url, .. } => url,
        }
    }

    pub fn at(&self) -> Instant {
        match self {
            Self::Json { at, .. } | Self::File { at, .. } => *at,
        }
    }

    pub fn json_body(&self) -> Option<&Value> {
        match self {
            Self::Json { body, .. } => Some(body),
            Self::File { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    json: VecDeque<Scripted>,
    files: VecDeque<Scripted>,
    calls: Vec<RecordedCall>,
}

/// Transport that replays queued responses and records every call
///
/// Runs out of script with a `Network` error so a test that under-scripts
/// fails loudly rather than hanging.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue workflow-run responses in order
    pub fn with_json_responses(self, responses: impl IntoIterator<Item = Scripted>) -> Self {
        self.script.lock().unwrap().json.extend(responses);
        self
    }

    /// Queue upload responses in order
    pub fn with_file_responses(self, responses: impl IntoIterator<Item = Scripted>) -> Self {
        self.script.lock().unwrap().files.extend(responses);
        self
    }

    pub fn push_json(&self, response: Scripted) {
        self.script.lock().unwrap().json.push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }

    /// Gaps between consecutive calls
    pub fn call_gaps(&self) -> Vec<Duration> {
        let calls = self.calls();
        calls.windows(2).map(|w| w[1].at() - w[0].at()).collect()
    }

    pub fn into_arc(self) -> Arc<dyn WorkflowTransport> {
        Arc::new(self)
    }
}

#[async_trait]
impl WorkflowTransport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(RecordedCall::Json {
            url: url.to_string(),
            body: body.clone(),
            at: Instant::now(),
        });
        script
            .json
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
    }

    async fn post_file(&self, url: &str, file: FilePart) -> Result<TransportResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(RecordedCall::File {
            url: url.to_string(),
            file,
            at: Instant::now(),
        });
        script
            .files
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
    }
}

/// Config pointing at the test endpoints with the given retry policy
pub fn test_config(retry: RetryPolicy) -> StudioConfig {
    StudioConfig::new()
        .with_endpoints(EndpointConfig {
            workflow_run: WORKFLOW_URL.to_string(),
            file_upload: UPLOAD_URL.to_string(),
            ..EndpointConfig::default()
        })
        .with_retry(retry)
}

pub fn ok(body: Value) -> Scripted {
    Ok(TransportResponse::json(200, &body))
}

pub fn status(status: u16, body: Value) -> Scripted {
    Ok(TransportResponse::json(status, &body))
}

pub fn timeout() -> Scripted {
    Err(TransportError::Timeout)
}

pub fn connection_reset() -> Scripted {
    Err(TransportError::Network("connection reset by peer".into()))
}

/// Workflow-run envelope whose `data` is a string-encoded JSON document
pub fn workflow_success(output_url: &str) -> Value {
    json!({
        "code": 0,
        "msg": "Success",
        "data": json!({ "output": output_url }).to_string(),
        "debug_url": "https://www.coze.cn/work_flow?execute_id=7000000000000000001",
        "usage": {"input_count": 120, "output_count": 48, "token_count": 168}
    })
}

/// Workflow-run envelope with no URL anywhere
pub fn workflow_without_artifact() -> Value {
    json!({
        "code": 0,
        "msg": "Success",
        "data": json!({ "text": "nothing to show" }).to_string()
    })
}

pub fn maintenance_body() -> Value {
    json!({"code": studio_config::MAINTENANCE_ERROR_CODE, "msg": "service under maintenance"})
}

pub fn upload_success(file_id: &str) -> Value {
    json!({
        "code": 0,
        "msg": "",
        "data": {"id": file_id, "bytes": 1024, "file_name": "logo.png", "created_at": 1_715_000_000}
    })
}

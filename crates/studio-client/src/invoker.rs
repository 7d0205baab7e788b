//! Workflow invoker with bounded linear retry
//!
//! One call to [`WorkflowInvoker::invoke`] is one logical generation request:
//! the same payload is resent after each transient failure, waiting
//! `n × base_delay` before retry `n`, until it succeeds, fails fatally or runs
//! out of retries.

use crate::error::InvokeError;
use crate::request::{WorkflowRequest, WorkflowResult};
use crate::retry::{classify_attempt, AttemptOutcome, RetryState};
use crate::transport::WorkflowTransport;
use std::sync::Arc;
use studio_config::{RetryPolicy, StudioConfig};
use tracing::Instrument;

/// Runs workflows against the remote service
#[derive(Clone)]
pub struct WorkflowInvoker {
    transport: Arc<dyn WorkflowTransport>,
    endpoint: String,
    policy: RetryPolicy,
}

impl WorkflowInvoker {
    /// Create invoker
    #[must_use]
    pub fn new(transport: Arc<dyn WorkflowTransport>, endpoint: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            policy,
        }
    }

    /// Create invoker from configuration
    #[must_use]
    pub fn from_config(transport: Arc<dyn WorkflowTransport>, config: &StudioConfig) -> Self {
        Self::new(transport, config.endpoints.workflow_run.clone(), config.retry.clone())
    }

    /// With a different retry policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Default retry policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Workflow-run endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a workflow with the default retry policy
    ///
    /// # Errors
    /// The fatal error that stopped the invocation, or the last transient
    /// error once retries are exhausted
    pub async fn invoke(&self, request: &WorkflowRequest) -> Result<WorkflowResult, InvokeError> {
        self.invoke_with(request, &self.policy).await
    }

    /// Run a workflow with an explicit retry policy
    ///
    /// # Errors
    /// See [`invoke`](Self::invoke)
    pub async fn invoke_with(
        &self,
        request: &WorkflowRequest,
        policy: &RetryPolicy,
    ) -> Result<WorkflowResult, InvokeError> {
        let span = tracing::info_span!(
            "invoke_workflow",
            workflow_id = %request.workflow_id(),
            invocation = %ulid::Ulid::new(),
        );
        self.run(request, policy).instrument(span).await
    }

    async fn run(&self, request: &WorkflowRequest, policy: &RetryPolicy) -> Result<WorkflowResult, InvokeError> {
        let payload = request.to_payload();
        let mut state = RetryState::default();

        loop {
            state.attempt += 1;
            tracing::debug!(attempt = state.attempt, "posting workflow request");

            let result = self.transport.post_json(&self.endpoint, &payload).await;
            match classify_attempt(result, request.workflow_id(), policy) {
                AttemptOutcome::Success(result) => {
                    tracing::info!(attempts = state.attempt, "workflow completed");
                    return Ok(result);
                }
                AttemptOutcome::Fatal(err) => {
                    tracing::error!(attempt = state.attempt, error = %err, "workflow failed");
                    return Err(err);
                }
                AttemptOutcome::Retryable(err) => {
                    let message = err.to_string();
                    match state.record(err, policy) {
                        Ok(delay) => {
                            tracing::warn!(
                                attempt = state.attempt,
                                max_retries = policy.max_retries,
                                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                                error = %message,
                                "transient failure, retrying"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        Err(last) => {
                            tracing::error!(attempts = state.attempt, error = %last, "retries exhausted");
                            return Err(last);
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for WorkflowInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowInvoker")
            .field("endpoint", &self.endpoint)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::{MockWorkflowTransport, TransportResponse};
    use serde_json::json;
    use std::time::Duration;

    const URL: &str = "https://service.test/v1/workflow/run";

    fn invoker(mock: MockWorkflowTransport, max_retries: u32) -> WorkflowInvoker {
        WorkflowInvoker::new(Arc::new(mock), URL, RetryPolicy::new(max_retries, Duration::ZERO))
    }

    fn request() -> WorkflowRequest {
        WorkflowRequest::builder("wf-1").text("input", "sale").build()
    }

    #[tokio::test]
    async fn sends_payload_to_endpoint() {
        let mut mock = MockWorkflowTransport::new();
        mock.expect_post_json()
            .withf(|url, body| {
                url == URL
                    && body == &json!({"workflow_id": "wf-1", "parameters": {"input": "sale"}})
            })
            .times(1)
            .returning(|_, _| Ok(TransportResponse::json(200, &json!({"code": 0, "data": "ok"}))));

        let result = invoker(mock, 2).invoke(&request()).await.unwrap();
        assert_eq!(result.workflow_id.as_str(), "wf-1");
        assert_eq!(result.raw_response["data"], "ok");
    }

    #[tokio::test]
    async fn maintenance_is_not_retried() {
        let mut mock = MockWorkflowTransport::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(TransportResponse::json(500, &json!({"code": 720702069}))));

        let err = invoker(mock, 2).invoke(&request()).await.unwrap_err();
        assert!(err.is_maintenance());
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_exhausted() {
        let mut mock = MockWorkflowTransport::new();
        mock.expect_post_json()
            .times(3)
            .returning(|_, _| Err(TransportError::Timeout));

        let err = invoker(mock, 2).invoke(&request()).await.unwrap_err();
        assert_eq!(err, InvokeError::Timeout);
    }

    #[tokio::test]
    async fn no_retry_policy_makes_one_attempt() {
        let mut mock = MockWorkflowTransport::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(TransportResponse::new(503, "unavailable")));

        let invoker = invoker(mock, 2);
        let err = invoker.invoke_with(&request(), &RetryPolicy::no_retry()).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let mut mock = MockWorkflowTransport::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_post_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(TransportError::Network("connection reset".into())));
        mock.expect_post_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(TransportResponse::json(200, &json!({"code": 0}))));

        assert!(invoker(mock, 2).invoke(&request()).await.is_ok());
    }
}

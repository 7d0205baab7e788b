//! Retry behaviour of the workflow invoker.
//!
//! - Maintenance responses are never retried.
//! - Transient failures are retried up to `max_retries` with linear backoff.
//! - Client errors and service errors fail on the first attempt.
//! - Exhaustion surfaces the last transient error.
//! - Every attempt resends the identical payload.

use std::time::Duration;
use studio_client::{InvokeError, WorkflowInvoker, WorkflowRequest};
use studio_config::RetryPolicy;
use studio_test_utils::{
    connection_reset, maintenance_body, ok, status, test_config, timeout, workflow_success, ScriptedTransport,
    WORKFLOW_URL,
};

fn invoker(transport: &ScriptedTransport, policy: RetryPolicy) -> WorkflowInvoker {
    WorkflowInvoker::from_config(transport.clone().into_arc(), &test_config(policy))
}

fn request() -> WorkflowRequest {
    WorkflowRequest::builder("7456751735379034153")
        .text("prompt", "autumn launch poster")
        .file("logo1", "file_logo")
        .build()
}

fn assert_gap(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(50),
        "expected ~{expected:?}, got {actual:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn maintenance_fails_after_one_attempt() {
    let transport = ScriptedTransport::new().with_json_responses([status(500, maintenance_body()), ok(workflow_success("https://x/a.png"))]);

    let err = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap_err();

    assert!(matches!(err, InvokeError::Maintenance { code: 720_702_069, .. }));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failure_then_success() {
    let transport = ScriptedTransport::new().with_json_responses([timeout(), ok(workflow_success("https://x/a.png"))]);

    let result = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap();

    assert_eq!(result.workflow_id.as_str(), "7456751735379034153");
    assert_eq!(transport.call_count(), 2);
    assert_gap(transport.call_gaps()[0], Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn exhaustion_returns_last_error_with_linear_delays() {
    let transport = ScriptedTransport::new().with_json_responses([
        timeout(),
        status(503, serde_json::json!({"msg": "busy"})),
        connection_reset(),
        ok(workflow_success("https://x/never.png")),
    ]);

    let err = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap_err();

    assert!(matches!(err, InvokeError::Network(_)));
    assert_eq!(transport.call_count(), 3);
    let gaps = transport.call_gaps();
    assert_gap(gaps[0], Duration::from_millis(1000));
    assert_gap(gaps[1], Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn client_error_is_not_retried() {
    let transport = ScriptedTransport::new().with_json_responses([status(400, serde_json::json!({"code": 4000, "msg": "bad parameters"}))]);

    let err = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_is_not_retried() {
    let transport = ScriptedTransport::new().with_json_responses([status(429, serde_json::json!({"msg": "slow down"}))]);

    let err = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn service_error_in_success_envelope_is_fatal() {
    let transport = ScriptedTransport::new().with_json_responses([ok(serde_json::json!({"code": 4020, "msg": "quota exceeded"}))]);

    let err = invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap_err();

    assert_eq!(
        err,
        InvokeError::Service {
            code: 4020,
            message: "quota exceeded".into()
        }
    );
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn retries_resend_identical_payload() {
    let transport = ScriptedTransport::new().with_json_responses([timeout(), timeout(), ok(workflow_success("https://x/a.png"))]);

    invoker(&transport, RetryPolicy::default()).invoke(&request()).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.url() == WORKFLOW_URL));
    let expected = request().to_payload();
    assert!(calls.iter().all(|c| c.json_body() == Some(&expected)));
}

#[tokio::test(start_paused = true)]
async fn explicit_policy_overrides_default() {
    let transport = ScriptedTransport::new().with_json_responses([timeout(), timeout(), timeout(), timeout(), timeout()]);

    let policy = RetryPolicy::new(4, Duration::from_millis(10));
    let err = invoker(&transport, RetryPolicy::default())
        .invoke_with(&request(), &policy)
        .await
        .unwrap_err();

    assert_eq!(err, InvokeError::Timeout);
    assert_eq!(transport.call_count(), 5);
    let gaps = transport.call_gaps();
    for (i, gap) in gaps.iter().enumerate() {
        assert_gap(*gap, Duration::from_millis(10 * (i as u64 + 1)));
    }
}

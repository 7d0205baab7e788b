//! Attempt classification
//!
//! Each attempt resolves to exactly one [`AttemptOutcome`]; the invoker's retry
//! loop only ever branches on that tag.

use crate::error::{service_code, service_message, ErrorBody, InvokeError, TransportError};
use crate::request::WorkflowResult;
use crate::transport::TransportResponse;
use serde_json::Value;
use std::time::Duration;
use studio_config::{RetryPolicy, WorkflowId};

/// Result of a single attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Workflow ran and returned a usable envelope
    Success(WorkflowResult),
    /// Transient failure; another attempt may succeed
    Retryable(InvokeError),
    /// Terminal failure for this invocation
    Fatal(InvokeError),
}

impl AttemptOutcome {
    /// Tag an error according to its retryability
    #[must_use]
    pub fn from_error(err: InvokeError) -> Self {
        if err.is_retryable() {
            Self::Retryable(err)
        } else {
            Self::Fatal(err)
        }
    }

    /// Check for success
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Classify one attempt's transport result
#[must_use]
pub fn classify_attempt(
    result: Result<TransportResponse, TransportError>,
    workflow_id: &WorkflowId,
    policy: &RetryPolicy,
) -> AttemptOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return AttemptOutcome::from_error(err.into()),
    };

    if !response.is_success() {
        let body = ErrorBody::parse(&response.body);
        if let Some(code) = body.service_code().filter(|c| policy.is_maintenance(*c)) {
            return AttemptOutcome::Fatal(InvokeError::Maintenance { code, body });
        }
        return AttemptOutcome::from_error(InvokeError::Http {
            status: response.status,
            body,
        });
    }

    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(e) => return AttemptOutcome::Fatal(InvokeError::MalformedResponse(e.to_string())),
    };

    match service_code(&value) {
        Some(code) if policy.is_maintenance(code) => AttemptOutcome::Fatal(InvokeError::Maintenance {
            code,
            body: ErrorBody::Json(value),
        }),
        Some(code) if code != 0 => {
            let message = service_message(&value).unwrap_or("unknown error").to_string();
            AttemptOutcome::Fatal(InvokeError::Service { code, message })
        }
        _ => AttemptOutcome::Success(WorkflowResult::from_response(workflow_id, value)),
    }
}

/// Per-invocation retry bookkeeping
#[derive(Debug, Default)]
pub(crate) struct RetryState {
    /// Attempts made so far
    pub(crate) attempt: u32,
}

impl RetryState {
    /// Record a retryable failure
    ///
    /// Returns the delay before the next attempt, or hands the failure back as
    /// the invocation's last error once the policy is exhausted.
    pub(crate) fn record(&self, err: InvokeError, policy: &RetryPolicy) -> Result<Duration, InvokeError> {
        if self.attempt > policy.max_retries {
            return Err(err);
        }
        Ok(policy.delay_for(self.attempt))
    }
}

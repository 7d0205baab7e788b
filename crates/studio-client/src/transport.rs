//! HTTP transport seam
//!
//! The invoker and uploader speak to the remote service through
//! [`WorkflowTransport`], so tests can substitute scripted responses. The
//! production implementation is [`HttpTransport`] on top of `reqwest`.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Create response
    #[inline]
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create response with a JSON body
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Check for a 2xx status
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// File to upload as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Original file name
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// MIME type, if known
    pub mime: Option<String>,
}

impl FilePart {
    /// Create file part
    #[inline]
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    /// With MIME type
    #[inline]
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Outbound requests to the generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowTransport: Send + Sync {
    /// POST a JSON body
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError>;

    /// POST a single file as `multipart/form-data` (field name `file`)
    async fn post_file(&self, url: &str, file: FilePart) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with bearer authentication
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    token: String,
}

impl HttpTransport {
    /// Create transport with a per-request timeout
    ///
    /// # Errors
    /// `TransportError::InvalidRequest` if the HTTP client cannot be built
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self::with_client(client, token))
    }

    /// Create transport around an existing client
    #[inline]
    #[must_use]
    pub fn with_client(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WorkflowTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.bearer())
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(classify)?;
        Self::read(response).await
    }

    async fn post_file(&self, url: &str, file: FilePart) -> Result<TransportResponse, TransportError> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime) = file.mime {
            part = part
                .mime_str(&mime)
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        }
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.bearer())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;
        Self::read(response).await
    }
}

/// Map a reqwest failure onto the transport taxonomy
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

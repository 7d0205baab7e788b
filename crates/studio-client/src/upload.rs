//! Multipart file upload
//!
//! Uploads are single-attempt: a failed upload is reported immediately and
//! the caller decides whether to try again.

use crate::error::{ErrorBody, UploadError};
use crate::request::FileReference;
use crate::transport::{FilePart, WorkflowTransport};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use studio_config::StudioConfig;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Identifier to reference the file in workflow parameters
    pub file_id: String,
    /// Name the file was uploaded under
    pub file_name: String,
}

impl UploadedFile {
    /// Reference for use as a workflow parameter
    #[must_use]
    pub fn reference(&self) -> FileReference {
        FileReference::new(self.file_id.clone())
    }
}

/// Uploads files to the service's file store
#[derive(Clone)]
pub struct FileUploader {
    transport: Arc<dyn WorkflowTransport>,
    endpoint: String,
}

impl FileUploader {
    /// Create uploader
    #[must_use]
    pub fn new(transport: Arc<dyn WorkflowTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Create uploader from configuration
    #[must_use]
    pub fn from_config(transport: Arc<dyn WorkflowTransport>, config: &StudioConfig) -> Self {
        Self::new(transport, config.endpoints.file_upload.clone())
    }

    /// Upload endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload one file
    ///
    /// # Errors
    /// - `Unauthorized` / `PayloadTooLarge` for HTTP 401 / 413
    /// - `Http` for any other non-success status
    /// - `MissingFileId` when a success response carries no file id
    pub async fn upload(&self, file: FilePart) -> Result<UploadedFile, UploadError> {
        let file_name = file.file_name.clone();
        tracing::info!(file = %file_name, size = file.bytes.len(), "uploading file");

        let response = self.transport.post_file(&self.endpoint, file).await?;
        if !response.is_success() {
            let err = UploadError::from_status(response.status, ErrorBody::parse(&response.body));
            tracing::warn!(file = %file_name, status = response.status, error = %err, "upload failed");
            return Err(err);
        }

        let body: Value =
            serde_json::from_str(&response.body).map_err(|e| UploadError::MalformedResponse(e.to_string()))?;
        let Some(file_id) = file_id(&body) else {
            return Err(UploadError::MissingFileId {
                body: ErrorBody::Json(body),
            });
        };

        tracing::info!(file = %file_name, file_id = %file_id, "file uploaded");
        Ok(UploadedFile { file_id, file_name })
    }

    /// Read a local file and upload it, guessing the MIME type from its extension
    ///
    /// # Errors
    /// `ReadFile` if the file cannot be read; otherwise as [`upload`](Self::upload)
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Result<UploadedFile, UploadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::ReadFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        let mut part = FilePart::new(file_name, bytes);
        if let Some(mime) = guess_mime(path) {
            part = part.with_mime(mime);
        }
        self.upload(part).await
    }
}

impl std::fmt::Debug for FileUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUploader")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// File id at `id` or `data.id`; numbers are stringified, blanks rejected
fn file_id(body: &Value) -> Option<String> {
    let as_id = |v: &Value| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    body.get("id")
        .and_then(as_id)
        .or_else(|| body.get("data").and_then(|d| d.get("id")).and_then(as_id))
}

/// MIME type for common image extensions
#[must_use]
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

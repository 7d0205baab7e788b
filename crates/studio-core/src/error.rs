//! Error types for Studio actions
//!
//! Every failure a user action can hit, with a user-facing rendering:
//! - Workflow invocation failures (maintenance, network, service errors)
//! - Upload failures (auth, size, missing file id)
//! - Configuration problems
//! - Successful runs that produced nothing usable

use studio_client::{InvokeError, TransportError, UploadError};
use studio_config::{ConfigError, WorkflowId};

/// Main Studio error type
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Workflow invocation failed
    #[error("workflow invocation failed: {0}")]
    Invoke(#[from] InvokeError),

    /// File upload failed
    #[error("file upload failed: {0}")]
    Upload(#[from] UploadError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be set up
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),

    /// Workflow succeeded but its response holds no artifact URL
    #[error("workflow {workflow_id} returned no recognizable artifact url")]
    NoArtifact { workflow_id: WorkflowId },

    /// Field is not part of the resolved schema
    #[error("unknown field '{field}' for template {template}")]
    UnknownField { field: String, template: String },

    /// File attached to a text field
    #[error("field '{0}' does not accept files")]
    NotAFileField(String),
}

impl StudioError {
    /// Check for the service-maintenance condition
    #[inline]
    #[must_use]
    pub fn is_maintenance(&self) -> bool {
        matches!(self, Self::Invoke(e) if e.is_maintenance())
    }

    /// Check if the action may succeed when repeated later
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Invoke(e) => e.is_retryable() || e.is_maintenance(),
            Self::Upload(UploadError::Timeout | UploadError::Network(_)) => true,
            Self::Upload(UploadError::Http { status, .. }) => (500..=599).contains(status),
            _ => false,
        }
    }

    /// Sentence suitable for showing to the person who triggered the action
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invoke(InvokeError::Maintenance { .. }) => {
                "The generation service is under maintenance or temporarily unavailable. \
                 This is a server-side issue; please try again later."
                    .to_string()
            }
            Self::Invoke(InvokeError::Timeout | InvokeError::Network(_))
            | Self::Upload(UploadError::Timeout | UploadError::Network(_)) => {
                "Network error: check your connection and try again.".to_string()
            }
            Self::Invoke(InvokeError::Http { status: 401 | 403, .. }) | Self::Upload(UploadError::Unauthorized) => {
                "The API token was rejected. Check that it is set and has not expired.".to_string()
            }
            Self::Invoke(InvokeError::Service { message, .. }) => {
                format!("Design generation failed: {message}. Please try again later or contact an administrator.")
            }
            Self::Invoke(e) => format!("Design generation failed: {e}. Please try again later."),
            Self::Upload(UploadError::PayloadTooLarge) => {
                "The file is too large to upload. Please choose a smaller image.".to_string()
            }
            Self::Upload(UploadError::MissingFileId { .. }) => {
                "The upload finished but no file id was returned, so the file cannot be used.".to_string()
            }
            Self::Upload(UploadError::ReadFile { path, .. }) => format!("Cannot read the file {path}."),
            Self::Upload(e) => format!("Image upload failed: {e}. Please try again."),
            Self::Config(ConfigError::MissingToken(var)) => {
                format!("No API token configured. Set the {var} environment variable.")
            }
            Self::Config(e) => format!("The configuration is invalid: {e}."),
            Self::Transport(e) => format!("Could not prepare the HTTP client: {e}."),
            Self::NoArtifact { .. } => {
                "The design was generated, but no image URL could be found in the response.".to_string()
            }
            Self::UnknownField { field, .. } => format!("The selected template has no field named '{field}'."),
            Self::NotAFileField(field) => format!("The field '{field}' takes text, not a file."),
        }
    }
}

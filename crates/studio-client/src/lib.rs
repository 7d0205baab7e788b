//! Studio client
//!
//! Talks to the remote generation service:
//! - Runs workflows with bounded linear retry and maintenance detection
//! - Uploads files for use as workflow parameters
//! - Classifies every failure structurally as retryable or fatal
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use studio_client::{HttpTransport, WorkflowInvoker, WorkflowRequest};
//! use studio_config::StudioConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StudioConfig::new().with_env_overrides()?;
//! let transport = HttpTransport::new(config.api_token()?, config.endpoints.request_timeout())?;
//! let invoker = WorkflowInvoker::from_config(Arc::new(transport), &config);
//!
//! let request = WorkflowRequest::builder("7456751735379034153")
//!     .text("prompt", "summer sale banner")
//!     .build();
//! let result = invoker.invoke(&request).await?;
//! println!("{}", result.raw_response);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod invoker;
pub mod request;
pub mod retry;
pub mod transport;
pub mod upload;

pub use error::{ErrorBody, InvokeError, TransportError, UploadError};
pub use invoker::WorkflowInvoker;
pub use request::{FileReference, ParameterValue, Parameters, WorkflowRequest, WorkflowRequestBuilder, WorkflowResult};
pub use retry::{classify_attempt, AttemptOutcome};
pub use transport::{FilePart, HttpTransport, TransportResponse, WorkflowTransport};
pub use upload::{guess_mime, FileUploader, UploadedFile};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

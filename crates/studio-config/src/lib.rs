//! Studio configuration
//!
//! Immutable, explicitly passed configuration for the Studio client:
//! - Remote endpoints and the bearer-token source
//! - Retry policy for workflow runs
//! - Workflow routing by template and scenario
//! - Input field schemas per template
//!
//! # Example
//!
//! ```rust
//! use studio_config::StudioConfig;
//!
//! let config = StudioConfig::new();
//! let workflow = config.workflows.resolve("banner", Some("banner-2"));
//! assert_eq!(workflow.as_str(), "7505972589878525964");
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod fields;
pub mod routing;

pub use config::{EndpointConfig, RetryPolicy, StudioConfig};
pub use defaults::{DEFAULT_WORKFLOW_ID, MAINTENANCE_ERROR_CODE};
pub use error::ConfigError;
pub use fields::{FieldKind, FieldSchemas, FieldSpec};
pub use routing::{WorkflowId, WorkflowRoutes};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

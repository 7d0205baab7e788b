//! Studio Core - design generation actions
//!
//! The user-facing layer of the Studio client:
//! - Resolves the workflow and input fields for a scenario/template selection
//! - Keeps per-template form state and maps it onto workflow parameters
//! - Runs the workflow and extracts the generated artifact's URL
//! - Uploads files into form fields
//! - Renders every failure as a user-facing message
//!
//! # Example
//!
//! ```rust,ignore
//! use studio_config::StudioConfig;
//! use studio_core::{FormState, Selection, Studio};
//!
//! # async fn example() -> Result<(), studio_core::StudioError> {
//! let studio = Studio::connect(StudioConfig::new().with_env_overrides()?)?;
//!
//! let selection = Selection::scenario("poster").with_template("poster-promotion-1");
//! let form = FormState::new().with_text("input", "Autumn sale, 30% off");
//!
//! let design = studio.generate(&selection, &form).await?;
//! println!("{}", design.url);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod form;
pub mod studio;

pub use error::StudioError;
pub use form::{FieldValue, FormState, Selection};
pub use studio::{GeneratedDesign, Studio};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Studio Core
    pub use crate::{FieldValue, FormState, GeneratedDesign, Selection, Studio, StudioError};
    pub use studio_client::{FilePart, UploadedFile};
    pub use studio_config::{RetryPolicy, StudioConfig, WorkflowId};
    pub use studio_extract::ExtractedArtifact;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Studio facade
//!
//! Ties configuration, invocation, upload and extraction into the two user
//! actions: generate a design, and upload a file into a form field.

use crate::error::StudioError;
use crate::form::{FormState, Selection};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use studio_client::{
    FilePart, FileUploader, HttpTransport, UploadedFile, WorkflowInvoker, WorkflowRequest,
    WorkflowTransport,
};
use studio_config::{FieldKind, FieldSpec, RetryPolicy, StudioConfig, WorkflowId};
use studio_extract::{ExtractedArtifact, ExtractorChain};

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDesign {
    /// Workflow that produced the design
    pub workflow_id: WorkflowId,
    /// Location of the generated artifact
    pub url: String,
    /// Extraction strategy that found the URL
    pub strategy: &'static str,
}

/// Entry point for Studio actions
pub struct Studio {
    config: StudioConfig,
    invoker: WorkflowInvoker,
    uploader: FileUploader,
    extractor: ExtractorChain,
}

impl Studio {
    /// Create studio over an existing transport
    #[must_use]
    pub fn new(config: StudioConfig, transport: Arc<dyn WorkflowTransport>) -> Self {
        let invoker = WorkflowInvoker::from_config(Arc::clone(&transport), &config);
        let uploader = FileUploader::from_config(transport, &config);
        Self {
            config,
            invoker,
            uploader,
            extractor: ExtractorChain::with_defaults(),
        }
    }

    /// Create studio talking HTTP with the token from the environment
    ///
    /// # Errors
    /// - `Config` if the configuration is invalid or the token is missing
    /// - `Transport` if the HTTP client cannot be built
    pub fn connect(config: StudioConfig) -> Result<Self, StudioError> {
        config.validate()?;
        let token = config.api_token()?;
        let transport = HttpTransport::new(token, config.endpoints.request_timeout())?;
        tracing::info!(
            workflow_url = %config.endpoints.workflow_run,
            upload_url = %config.endpoints.file_upload,
            "studio connected"
        );
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// With a custom extraction chain
    #[must_use]
    pub fn with_extractor(mut self, extractor: ExtractorChain) -> Self {
        self.extractor = extractor;
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Workflow that serves a selection
    #[must_use]
    pub fn workflow_for(&self, selection: &Selection) -> &WorkflowId {
        self.config.workflows.resolve(&selection.scenario, selection.template())
    }

    /// Input fields for a selection
    #[must_use]
    pub fn fields_for(&self, selection: &Selection) -> &[FieldSpec] {
        self.config.fields.resolve(&selection.scenario, selection.template())
    }

    /// Build the request a generation would send
    #[must_use]
    pub fn request_for(&self, selection: &Selection, form: &FormState) -> WorkflowRequest {
        let parameters = form.to_parameters(self.fields_for(selection));
        WorkflowRequest::new(self.workflow_for(selection).clone(), parameters)
    }

    /// Generate a design with the configured retry policy
    ///
    /// # Errors
    /// - `Invoke` when the workflow run fails
    /// - `NoArtifact` when it succeeds without a usable URL
    pub async fn generate(&self, selection: &Selection, form: &FormState) -> Result<GeneratedDesign, StudioError> {
        self.generate_with(selection, form, self.invoker.policy()).await
    }

    /// Generate a design with an explicit retry policy
    ///
    /// # Errors
    /// See [`generate`](Self::generate)
    pub async fn generate_with(
        &self,
        selection: &Selection,
        form: &FormState,
        policy: &RetryPolicy,
    ) -> Result<GeneratedDesign, StudioError> {
        let request = self.request_for(selection, form);
        tracing::info!(
            scenario = %selection.scenario,
            template = selection.template().unwrap_or("-"),
            workflow_id = %request.workflow_id(),
            parameters = request.parameters().len(),
            "generating design"
        );

        let result = self.invoker.invoke_with(&request, policy).await?;
        let Some(artifact) = self.extractor.extract(&result.raw_response) else {
            tracing::warn!(workflow_id = %result.workflow_id, "no artifact url in workflow response");
            return Err(StudioError::NoArtifact {
                workflow_id: result.workflow_id,
            });
        };

        tracing::info!(url = %artifact.url, strategy = artifact.strategy, "design generated");
        Ok(GeneratedDesign {
            workflow_id: result.workflow_id,
            url: artifact.url,
            strategy: artifact.strategy,
        })
    }

    /// Upload a file and attach it to a form field
    ///
    /// The form is only touched once the upload has returned a file id.
    ///
    /// # Errors
    /// - `UnknownField` / `NotAFileField` if the field cannot take a file
    /// - `Upload` when the upload fails
    pub async fn upload_into_form(
        &self,
        form: &mut FormState,
        selection: &Selection,
        field_id: &str,
        file: FilePart,
    ) -> Result<UploadedFile, StudioError> {
        self.check_file_field(selection, field_id)?;
        let uploaded = self.uploader.upload(file).await?;
        form.attach_file(field_id, uploaded.clone());
        Ok(uploaded)
    }

    /// Upload a standalone file
    ///
    /// # Errors
    /// `Upload` when the file cannot be read or the upload fails
    pub async fn upload_path(&self, path: impl AsRef<std::path::Path>) -> Result<UploadedFile, StudioError> {
        Ok(self.uploader.upload_path(path).await?)
    }

    /// Read a local file and attach it to a form field
    ///
    /// # Errors
    /// See [`upload_into_form`](Self::upload_into_form)
    pub async fn upload_path_into_form(
        &self,
        form: &mut FormState,
        selection: &Selection,
        field_id: &str,
        path: impl AsRef<std::path::Path>,
    ) -> Result<UploadedFile, StudioError> {
        self.check_file_field(selection, field_id)?;
        let uploaded = self.uploader.upload_path(path).await?;
        form.attach_file(field_id, uploaded.clone());
        Ok(uploaded)
    }

    /// Find the artifact URL in a workflow response
    #[must_use]
    pub fn extract(&self, response: &Value) -> Option<ExtractedArtifact> {
        self.extractor.extract(response)
    }

    fn check_file_field(&self, selection: &Selection, field_id: &str) -> Result<(), StudioError> {
        let spec = self
            .fields_for(selection)
            .iter()
            .find(|f| f.id == field_id)
            .ok_or_else(|| StudioError::UnknownField {
                field: field_id.to_string(),
                template: selection
                    .template()
                    .map_or_else(|| format!("(scenario {})", selection.scenario), str::to_string),
            })?;
        if spec.kind != FieldKind::File {
            return Err(StudioError::NotAFileField(field_id.to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("invoker", &self.invoker)
            .field("uploader", &self.uploader)
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

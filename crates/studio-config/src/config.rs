//! Studio configuration
//!
//! Configuration is assembled once (defaults, then an optional file, then
//! environment overrides) and handed to the client explicitly. Nothing here is
//! global or mutable after construction.

use crate::defaults::{DEFAULT_UPLOAD_URL, DEFAULT_WORKFLOW_URL, MAINTENANCE_ERROR_CODE};
use crate::error::ConfigError;
use crate::fields::FieldSchemas;
use crate::routing::WorkflowRoutes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Remote service endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Workflow execution endpoint
    pub workflow_run: String,
    /// File upload endpoint
    pub file_upload: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Environment variable holding the bearer token
    pub token_env: String,
}

impl EndpointConfig {
    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            workflow_run: DEFAULT_WORKFLOW_URL.to_string(),
            file_upload: DEFAULT_UPLOAD_URL.to_string(),
            request_timeout_secs: 60,
            token_env: "STUDIO_API_TOKEN".to_string(),
        }
    }
}

/// Bounded linear retry policy for workflow invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Additional attempts after the first
    pub max_retries: u32,
    /// Delay unit; retry `n` waits `n * base_delay_ms`
    pub base_delay_ms: u64,
    /// Service error codes that mean "under maintenance, do not retry"
    pub maintenance_codes: Vec<i64>,
}

impl RetryPolicy {
    /// Create policy with the default maintenance codes
    #[inline]
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay_ms: u64::try_from(base_delay.as_millis()).unwrap_or(u64::MAX),
            maintenance_codes: vec![MAINTENANCE_ERROR_CODE],
        }
    }

    /// Policy that never retries
    #[inline]
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// With max retries
    #[inline]
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// With base delay
    #[inline]
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(base_delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Base delay as a duration
    #[inline]
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Delay before retry number `retry` (1-based)
    #[inline]
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay().saturating_mul(retry)
    }

    /// Total attempts this policy allows
    #[inline]
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Check if a service code signals maintenance
    #[inline]
    #[must_use]
    pub fn is_maintenance(&self, code: i64) -> bool {
        self.maintenance_codes.contains(&code)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(1000))
    }
}

/// Complete Studio configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Remote endpoints
    pub endpoints: EndpointConfig,
    /// Retry policy for workflow runs
    pub retry: RetryPolicy,
    /// Workflow routing table
    pub workflows: WorkflowRoutes,
    /// Input field schemas
    pub fields: FieldSchemas,
}

impl StudioConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// With endpoints
    #[inline]
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// With workflow routes
    #[inline]
    #[must_use]
    pub fn with_workflows(mut self, workflows: WorkflowRoutes) -> Self {
        self.workflows = workflows;
        self
    }

    /// With field schemas
    #[inline]
    #[must_use]
    pub fn with_fields(mut self, fields: FieldSchemas) -> Self {
        self.fields = fields;
        self
    }

    /// Parse TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::parse("toml", e))
    }

    /// Parse YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse("yaml", e))
    }

    /// Parse JSON document
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::parse("json", e))
    }

    /// Load from file, choosing the format by extension
    ///
    /// # Errors
    /// - `ConfigError::UnsupportedFormat` for extensions other than
    ///   `toml`, `yaml`, `yml` and `json`
    /// - `ConfigError::Io` / `ConfigError::Parse` on read or syntax failure
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> Result<Self, ConfigError> = match ext.as_str() {
            "toml" => Self::from_toml_str,
            "yaml" | "yml" => Self::from_yaml_str,
            "json" => Self::from_json_str,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        parse(&content)
    }

    /// Apply overrides from an environment-like lookup
    ///
    /// Recognised keys: `STUDIO_WORKFLOW_URL`, `STUDIO_UPLOAD_URL`,
    /// `STUDIO_MAX_RETRIES`, `STUDIO_RETRY_BASE_MS`, `STUDIO_TIMEOUT_SECS`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STUDIO_WORKFLOW_URL") {
            self.endpoints.workflow_run = url;
        }
        if let Some(url) = lookup("STUDIO_UPLOAD_URL") {
            self.endpoints.file_upload = url;
        }
        if let Some(raw) = lookup("STUDIO_MAX_RETRIES") {
            self.retry.max_retries = parse_override("STUDIO_MAX_RETRIES", &raw)?;
        }
        if let Some(raw) = lookup("STUDIO_RETRY_BASE_MS") {
            self.retry.base_delay_ms = parse_override("STUDIO_RETRY_BASE_MS", &raw)?;
        }
        if let Some(raw) = lookup("STUDIO_TIMEOUT_SECS") {
            self.endpoints.request_timeout_secs = parse_override("STUDIO_TIMEOUT_SECS", &raw)?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    /// Validate internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("workflow_run", &self.endpoints.workflow_run),
            ("file_upload", &self.endpoints.file_upload),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "endpoint {name} must be an http(s) url, got '{url}'"
                )));
            }
        }

        if self.endpoints.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request timeout must be positive".into()));
        }

        if self.workflows.default.is_empty() {
            return Err(ConfigError::Invalid("default workflow id is empty".into()));
        }

        if let Some((key, _)) = self
            .workflows
            .templates
            .iter()
            .chain(self.workflows.scenarios.iter())
            .find(|(_, id)| id.is_empty())
        {
            return Err(ConfigError::Invalid(format!("route '{key}' has an empty workflow id")));
        }

        self.fields.check().map_err(ConfigError::Invalid)
    }

    /// Read the bearer token from the configured environment variable
    pub fn api_token(&self) -> Result<String, ConfigError> {
        self.api_token_from(|key| std::env::var(key).ok())
    }

    /// Read the bearer token through a lookup
    pub fn api_token_from<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.endpoints.token_env)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.endpoints.token_env.clone()))
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidOverride {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

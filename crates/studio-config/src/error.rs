//! Error types for configuration loading and validation

use std::path::PathBuf;

/// Errors raised while building a [`StudioConfig`](crate::StudioConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file extension is not one we can parse
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    /// Syntax or shape error in a config document
    #[error("failed to parse {format} config: {message}")]
    Parse {
        /// Document format (`toml`, `yaml` or `json`)
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Environment override could not be interpreted
    #[error("invalid value for {key}: '{value}'")]
    InvalidOverride {
        /// Environment variable name
        key: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// Configuration is structurally valid but inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Bearer token is absent from the environment
    #[error("api token not set (expected environment variable {0})")]
    MissingToken(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for a format
    pub fn parse(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ConfigError::MissingToken("STUDIO_API_TOKEN".into());
        assert!(err.to_string().contains("STUDIO_API_TOKEN"));

        let err = ConfigError::parse("toml", "expected table");
        assert_eq!(err.to_string(), "failed to parse toml config: expected table");

        let err = ConfigError::InvalidOverride {
            key: "STUDIO_MAX_RETRIES".into(),
            value: "many".into(),
        };
        assert_eq!(err.to_string(), "invalid value for STUDIO_MAX_RETRIES: 'many'");
    }
}

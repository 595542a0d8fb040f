// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Authentication failed for {service}: {message}")]
    Auth { service: String, message: String },

    #[error("Request to {service} failed: {message}")]
    Network { service: String, message: String },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("External process {program} failed: {reason}")]
    Process { program: String, reason: String },
}

impl PipelineError {
    pub fn auth(service: &str, message: impl Into<String>) -> Self {
        Self::Auth {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn network(service: &str, message: impl Into<String>) -> Self {
        Self::Network {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOperation {
            path: path.into(),
            source,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PipelineError::auth("Exa", "EXA_API_KEY environment variable not set");
        assert_eq!(
            err.to_string(),
            "Authentication failed for Exa: EXA_API_KEY environment variable not set"
        );
        assert!(err.is_auth());

        let err = PipelineError::InvalidArgument("num_results must be positive".to_string());
        assert!(err.is_invalid_argument());
    }
}

//! Error types for gitfolio-core

use std::sync::Arc;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gitfolio-core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error ({status}): {message}")]
    GitHub { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {field} filter: {value:?}")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A failed portfolio refresh, shared by every caller that waited on it
    #[error(transparent)]
    Refresh(Arc<Error>),
}

impl Error {
    /// True when the caller supplied bad input, as opposed to an upstream
    /// or local failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::InvalidFilter { .. } => true,
            Error::Refresh(inner) => inner.is_client_error(),
            _ => false,
        }
    }

    /// True when the failure came from talking to the remote service.
    pub fn is_upstream(&self) -> bool {
        match self {
            Error::GitHub { .. } | Error::Network(_) | Error::Serialization(_) => true,
            Error::Refresh(inner) => inner.is_upstream(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_client_error() {
        let err = Error::InvalidFilter {
            field: "language",
            value: "klingon".to_string(),
        };
        assert!(err.is_client_error());
        assert!(!err.is_upstream());
        assert_eq!(err.to_string(), "Invalid language filter: \"klingon\"");
    }

    #[test]
    fn test_github_error_is_upstream() {
        let err = Error::GitHub {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert!(err.is_upstream());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_shared_refresh_error_keeps_its_kind() {
        let err = Error::Refresh(Arc::new(Error::GitHub {
            status: 503,
            message: "Service Unavailable".to_string(),
        }));
        assert!(err.is_upstream());
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "GitHub API error (503): Service Unavailable");

        let err = Error::Refresh(Arc::new(Error::Config("bad".to_string())));
        assert!(!err.is_upstream());
    }
}

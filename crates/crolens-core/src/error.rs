//! Error types for the fallible edges of crolens.
//!
//! The analysis itself is total; only reading inputs, validating URLs and
//! talking to external services can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CroError {
    /// Invalid or malformed URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading an input file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input JSON did not match the expected record shape
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// External HTTP service error (page fetch, PageSpeed, headers)
    #[error("service error ({service}): {message}")]
    Http {
        service: &'static str,
        message: String,
    },
}

impl CroError {
    pub fn http(service: &'static str, message: impl Into<String>) -> Self {
        Self::Http {
            service,
            message: message.into(),
        }
    }
}

/// Result type alias using CroError.
pub type Result<T> = std::result::Result<T, CroError>;

//! Structured errors for the rename pipeline.
//!
//! `thiserror` for errors callers can match on; the CLI wraps these with
//! `anyhow` for rich context chains.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid match pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Contract violation: `render` was called for a name the pattern does
    /// not match. Callers check `matches` first.
    #[error("pattern `{pattern}` does not match `{input}`")]
    NoMatch { input: String, pattern: String },

    #[error("failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {path}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {path}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("failed to apply template {template}")]
    TemplateFailed {
        template: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for scene construction and the render path.

use thiserror::Error;

/// Result type for orrery operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Errors raised by the orrery core.
///
/// Table and config errors are raised once, at scene construction.
/// Texture and render errors are recovered from and logged by the caller.
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("invalid body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("duplicate body name: {0}")]
    DuplicateBody(String),

    #[error("body table is empty")]
    EmptyTable,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("texture '{path}' failed: {reason}")]
    Texture { path: String, reason: String },

    #[error("render error: {0}")]
    Render(String),
}

impl OrreryError {
    pub(crate) fn invalid_body(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

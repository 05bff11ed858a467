//! Error types for ossify.
//!
//! Rule evaluation never produces errors; everything here belongs to loading,
//! decoding and persisting conventions, settings and licenses.

use thiserror::Error;

/// Main error type for library operations.
#[derive(Error, Debug)]
pub enum OssifyError {
    /// File access or I/O error
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or encoding error
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Settings are unusable (e.g. an empty convention path)
    #[error("{0}")]
    Config(String),

    /// A convention document decoded but is not acceptable
    #[error("{0}")]
    InvalidConvention(String),

    #[error("{0}")]
    NotFound(String),
}

impl OssifyError {
    /// Wrap an I/O error with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        OssifyError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        OssifyError::Config(msg.into())
    }

    pub fn invalid_convention(msg: impl Into<String>) -> Self {
        OssifyError::InvalidConvention(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        OssifyError::NotFound(msg.into())
    }
}

/// Result type alias for ossify operations.
pub type Result<T> = std::result::Result<T, OssifyError>;

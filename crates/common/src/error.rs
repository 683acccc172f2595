//! Error types shared across Spintable crates.

use std::path::PathBuf;

/// Top-level error type for Spintable operations.
#[derive(Debug, thiserror::Error)]
pub enum SpintableError {
    #[error("Import error: {message}")]
    Import { message: String },

    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SpintableError.
pub type SpintableResult<T> = Result<T, SpintableError>;

impl SpintableError {
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import {
            message: msg.into(),
        }
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

//! Error types for vsx-registry

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No client is known for the registry key or endpoint.
    #[error("unknown registry: {key}")]
    UnknownRegistry { key: String },

    #[error("invalid extension id '{id}': {reason}")]
    InvalidExtensionId { id: String, reason: String },

    /// A registry operation failed below the router (network, decoding, ...).
    #[error("registry '{registry}' failed: {message}")]
    Transport { registry: String, message: String },

    #[error("catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("failed to parse {format} catalog at {path}: {message}")]
    CatalogParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("unsupported catalog format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Transport`] failure.
    pub fn transport(registry: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            registry: registry.into(),
            message: message.into(),
        }
    }
}

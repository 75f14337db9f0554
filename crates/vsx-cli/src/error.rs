//! Error types for vsx-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from vsx-router
    #[error(transparent)]
    Router(#[from] vsx_router::Error),

    /// Error from a registry during a query or search
    #[error(transparent)]
    Registry(#[from] vsx_registry::Error),

    /// Failed to render JSON output
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

//! Error types for vsx-router

use crate::config::FilterStage;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Condition keys that no registered rule consumed.
    #[error("unknown conditions: {}", .keys.join(", "))]
    UnknownConditions { keys: Vec<String> },

    #[error("condition '{key}' is claimed by more than one rule")]
    ConditionClaimedTwice { key: String },

    #[error("invalid pattern for '{key}': {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid 'use' in {stage} filter #{index}: {message}")]
    InvalidUse {
        stage: FilterStage,
        index: usize,
        message: String,
    },

    #[error("unknown registry: {key}")]
    UnknownRegistry { key: String },

    #[error("registry '{key}' is listed more than once in 'use'")]
    DuplicateRegistry { key: String },

    #[error("configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse {format} configuration at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("unsupported configuration format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Registry(#[from] vsx_registry::Error),
}

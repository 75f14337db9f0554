//! Shared test utilities for the vsx-router workspace.
//!
//! This crate provides the two-registry routing scenario used across test
//! suites, plus instrumented clients. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`scenario`]: the `internal`/`public` registries and their router config
//! - [`clients`]: [`clients::RecordingClient`] for counting, delaying and failing calls

pub mod clients;
pub mod scenario;

use vsx_registry::Extension;

/// `namespace.name` of each extension, in order.
pub fn ids(extensions: &[Extension]) -> Vec<String> {
    extensions.iter().map(Extension::id).collect()
}

/// `namespace.name@version` of each extension, in order.
pub fn versioned_ids(extensions: &[Extension]) -> Vec<String> {
    extensions.iter().map(Extension::versioned_id).collect()
}

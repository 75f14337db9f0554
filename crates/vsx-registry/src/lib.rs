//! Registry-side building blocks for the VSX router.
//!
//! This crate provides the extension identity model, the query and search
//! option types, the [`RegistryClient`] and [`ClientResolver`] capabilities
//! the router consumes, and a static in-memory catalog client.

pub mod catalog;
pub mod client;
pub mod error;
pub mod identity;
pub mod options;
pub mod resolver;

pub use catalog::{DEFAULT_VERSION, StaticRegistry};
pub use client::{ClientResolver, RegistryClient};
pub use error::{Error, Result};
pub use identity::{Extension, ExtensionId};
pub use options::{QueryOptions, QueryResult, SearchOptions, SearchResult};
pub use resolver::{CatalogFileResolver, MapResolver};

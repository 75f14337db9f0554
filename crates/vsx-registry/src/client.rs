//! Capabilities consumed by the router.

use crate::Result;
use crate::options::{QueryOptions, QueryResult, SearchOptions, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;

/// A catalog of extensions that can be queried and searched.
///
/// Implementations own their transport; the router never retries or caches.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn query(&self, options: &QueryOptions) -> Result<QueryResult>;
    async fn search(&self, options: &SearchOptions) -> Result<SearchResult>;
}

/// Looks up a [`RegistryClient`] by registry key or endpoint.
///
/// Fails with [`crate::Error::UnknownRegistry`] when nothing is known for
/// the given key.
#[async_trait]
pub trait ClientResolver: Send + Sync {
    async fn resolve(&self, endpoint: &str) -> Result<Arc<dyn RegistryClient>>;
}

//! [`ClientResolver`] implementations.

use crate::catalog::StaticRegistry;
use crate::client::{ClientResolver, RegistryClient};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Resolves endpoints from a fixed map of pre-built clients.
#[derive(Default, Clone)]
pub struct MapResolver {
    clients: HashMap<String, Arc<dyn RegistryClient>>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under an endpoint, replacing any previous one.
    pub fn insert(&mut self, endpoint: impl Into<String>, client: Arc<dyn RegistryClient>) {
        self.clients.insert(endpoint.into(), client);
    }

    pub fn with(mut self, endpoint: impl Into<String>, client: Arc<dyn RegistryClient>) -> Self {
        self.insert(endpoint, client);
        self
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.clients.contains_key(endpoint)
    }
}

#[async_trait]
impl ClientResolver for MapResolver {
    async fn resolve(&self, endpoint: &str) -> Result<Arc<dyn RegistryClient>> {
        self.clients
            .get(endpoint)
            .cloned()
            .ok_or_else(|| Error::UnknownRegistry {
                key: endpoint.to_string(),
            })
    }
}

/// Resolves endpoints as catalog file paths.
///
/// Relative paths are taken from `base_dir`. Each file is loaded once and the
/// resulting [`StaticRegistry`] is shared by later resolutions.
pub struct CatalogFileResolver {
    base_dir: PathBuf,
    loaded: Mutex<HashMap<PathBuf, Arc<StaticRegistry>>>,
}

impl CatalogFileResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, path: &Path) -> Option<Arc<StaticRegistry>> {
        self.loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .cloned()
    }
}

#[async_trait]
impl ClientResolver for CatalogFileResolver {
    async fn resolve(&self, endpoint: &str) -> Result<Arc<dyn RegistryClient>> {
        let path = self.base_dir.join(endpoint);
        if let Some(registry) = self.cached(&path) {
            return Ok(registry);
        }

        let registry = match StaticRegistry::load(&path).await {
            Ok(registry) => Arc::new(registry),
            Err(Error::CatalogNotFound { .. }) => {
                return Err(Error::UnknownRegistry {
                    key: endpoint.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        self.loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path, Arc::clone(&registry));
        Ok(registry)
    }
}

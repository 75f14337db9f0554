//! Instrumented [`RegistryClient`] wrappers.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vsx_registry::{
    Error, QueryOptions, QueryResult, RegistryClient, Result, SearchOptions, SearchResult,
};

/// Wraps a client, counting calls and optionally delaying or failing them.
pub struct RecordingClient {
    name: String,
    inner: Arc<dyn RegistryClient>,
    delay: Option<Duration>,
    fail: bool,
    queries: AtomicUsize,
    searches: AtomicUsize,
}

impl RecordingClient {
    pub fn new(name: impl Into<String>, inner: Arc<dyn RegistryClient>) -> Self {
        Self {
            name: name.into(),
            inner,
            delay: None,
            fail: false,
            queries: AtomicUsize::new(0),
            searches: AtomicUsize::new(0),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer every call with a transport error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.queries() + self.searches()
    }

    async fn before_call(&self) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::transport(&self.name, "simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistryClient for RecordingClient {
    async fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;
        self.inner.query(options).await
    }

    async fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;
        self.inner.search(options).await
    }
}

//! The federated registry client.

use crate::config::{FilterStage, RegistrySelection, RouterConfig, RuleConfig};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::rules::{RouterRules, RuleCompiler};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use vsx_registry::{
    ClientResolver, Extension, QueryOptions, QueryResult, RegistryClient, SearchOptions,
    SearchResult,
};

/// Filters compiled from one configuration entry, plus where they route to.
#[derive(Debug)]
struct FilterBinding {
    filters: Vec<Filter>,
    selection: RegistrySelection,
}

impl FilterBinding {
    /// A binding matches when at least one of its filters has a hook for the
    /// call and all such hooks pass.
    fn matches(verdicts: impl Iterator<Item = Option<bool>>) -> bool {
        let mut relevant = false;
        for verdict in verdicts.flatten() {
            if !verdict {
                return false;
            }
            relevant = true;
        }
        relevant
    }

    fn matches_query(&self, options: &QueryOptions) -> bool {
        Self::matches(self.filters.iter().map(|f| f.filter_query_options(options)))
    }

    fn matches_search(&self, options: &SearchOptions) -> bool {
        Self::matches(self.filters.iter().map(|f| f.filter_search_options(options)))
    }

    fn matches_extension(&self, extension: &Extension) -> bool {
        Self::matches(self.filters.iter().map(|f| f.filter_extension(extension)))
    }
}

struct Registry {
    key: String,
    client: Arc<dyn RegistryClient>,
}

/// Presents several registries as a single [`RegistryClient`].
///
/// Requests are dispatched concurrently to the registries selected by the
/// request filters. Responses are filtered entry by entry and concatenated in
/// `use` order, whatever order they arrive in.
pub struct RouterClient {
    registries: Vec<Registry>,
    request_bindings: Vec<FilterBinding>,
    result_bindings: Vec<FilterBinding>,
}

impl RouterClient {
    /// Compile the configured filters and resolve a client for every key in
    /// `use`.
    ///
    /// Fails on unclaimed filter conditions, malformed or unknown `use` keys,
    /// and on any resolver error.
    pub async fn from_config(
        config: &RouterConfig,
        resolver: &dyn ClientResolver,
        rules: &RouterRules,
    ) -> Result<Self> {
        let use_list = config.use_list();
        let mut seen = HashSet::new();
        for key in &use_list {
            if !seen.insert(key.as_str()) {
                return Err(Error::DuplicateRegistry { key: key.clone() });
            }
        }

        let request_bindings = compile_stage(
            config,
            FilterStage::Requests,
            &config.filters.requests,
            &RuleCompiler::new(&rules.requests),
        )?;
        let result_bindings = compile_stage(
            config,
            FilterStage::Results,
            &config.filters.results,
            &RuleCompiler::new(&rules.results),
        )?;

        let mut registries = Vec::with_capacity(use_list.len());
        for key in use_list {
            let endpoint = config.endpoint(&key);
            let client = resolver.resolve(endpoint).await?;
            tracing::debug!(registry = %key, %endpoint, "Resolved registry client");
            registries.push(Registry { key, client });
        }

        Ok(Self {
            registries,
            request_bindings,
            result_bindings,
        })
    }

    /// Registry keys in merge order.
    pub fn registry_keys(&self) -> impl Iterator<Item = &str> {
        self.registries.iter().map(|registry| registry.key.as_str())
    }

    pub fn request_filter_count(&self) -> usize {
        self.request_bindings.len()
    }

    pub fn result_filter_count(&self) -> usize {
        self.result_bindings.len()
    }

    /// Registries left after every matching request binding narrowed the set.
    fn dispatch_set(&self, matches: impl Fn(&FilterBinding) -> bool) -> Vec<&Registry> {
        let mut candidates: Vec<&Registry> = self.registries.iter().collect();
        for binding in &self.request_bindings {
            if matches(binding) {
                candidates.retain(|registry| binding.selection.allows(&registry.key));
            }
        }
        tracing::debug!(
            registries = ?candidates.iter().map(|r| r.key.as_str()).collect::<Vec<_>>(),
            "Computed dispatch set"
        );
        candidates
    }

    /// Drop entries that a matching result binding does not route to `registry`.
    fn filter_results(&self, registry: &str, extensions: Vec<Extension>) -> Vec<Extension> {
        extensions
            .into_iter()
            .filter(|extension| {
                let excluded = self.result_bindings.iter().any(|binding| {
                    binding.matches_extension(extension) && !binding.selection.allows(registry)
                });
                if excluded {
                    tracing::trace!(%registry, extension = %extension.versioned_id(), "Dropped result");
                }
                !excluded
            })
            .collect()
    }
}

#[async_trait]
impl RegistryClient for RouterClient {
    async fn query(&self, options: &QueryOptions) -> vsx_registry::Result<QueryResult> {
        let dispatch = self.dispatch_set(|binding| binding.matches_query(options));
        if dispatch.is_empty() {
            return Ok(QueryResult::default());
        }

        let responses = try_join_all(dispatch.into_iter().map(|registry| async move {
            let result = registry.client.query(options).await.inspect_err(|e| {
                tracing::warn!(registry = %registry.key, error = %e, "Registry query failed");
            })?;
            Ok::<_, vsx_registry::Error>((registry, result.extensions))
        }))
        .await?;

        let extensions = responses
            .into_iter()
            .flat_map(|(registry, extensions)| self.filter_results(&registry.key, extensions))
            .collect();
        Ok(QueryResult { extensions })
    }

    async fn search(&self, options: &SearchOptions) -> vsx_registry::Result<SearchResult> {
        let dispatch = self.dispatch_set(|binding| binding.matches_search(options));
        if dispatch.is_empty() {
            return Ok(SearchResult::default());
        }

        let responses = try_join_all(dispatch.into_iter().map(|registry| async move {
            let result = registry.client.search(options).await.inspect_err(|e| {
                tracing::warn!(registry = %registry.key, error = %e, "Registry search failed");
            })?;
            Ok::<_, vsx_registry::Error>((registry, result.extensions))
        }))
        .await?;

        // Pagination happened upstream, per registry.
        let extensions = responses
            .into_iter()
            .flat_map(|(registry, extensions)| self.filter_results(&registry.key, extensions))
            .collect();
        Ok(SearchResult {
            offset: 0,
            extensions,
        })
    }
}

fn compile_stage(
    config: &RouterConfig,
    stage: FilterStage,
    entries: &[RuleConfig],
    compiler: &RuleCompiler<'_>,
) -> Result<Vec<FilterBinding>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let filters = compiler.compile(entry)?;
            let selection =
                RegistrySelection::from_entry(entry).map_err(|message| Error::InvalidUse {
                    stage,
                    index,
                    message,
                })?;
            if let Some(key) = selection.keys().iter().find(|key| !config.knows(key)) {
                return Err(Error::UnknownRegistry { key: key.clone() });
            }
            tracing::debug!(%stage, index, filters = filters.len(), ?selection, "Compiled filter");
            Ok(FilterBinding { filters, selection })
        })
        .collect()
}

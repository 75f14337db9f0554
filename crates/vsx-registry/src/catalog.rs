//! Static in-memory registry.
//!
//! `StaticRegistry` serves a fixed list of extensions with the same matching
//! rules a remote registry applies: queries only find exact matches, searches
//! look for the query text in several fields.
//!
//! Catalogs can be built from `namespace.name[@version]` strings or loaded
//! from a catalog file:
//!
//! ```text
//! {
//!   "baseUrl": "https://internal.example/",
//!   "extensions": ["some.a@1.0.0", { "namespace": "other", "name": "d", "version": "1.2.0" }]
//! }
//! ```
//!
//! A bare JSON/YAML list of entries is accepted as well.

use crate::client::RegistryClient;
use crate::error::{Error, Result};
use crate::identity::{Extension, ExtensionId};
use crate::options::{QueryOptions, QueryResult, SearchOptions, SearchResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Version assigned to catalog ids written without `@version`.
pub const DEFAULT_VERSION: &str = "0.0.1";

const DEFAULT_BASE_URL: &str = "https://static.invalid/";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Id(String),
    Record(Extension),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CatalogEntry>),
    #[serde(rename_all = "camelCase")]
    Document {
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        extensions: Vec<CatalogEntry>,
    },
}

/// A registry backed by a fixed list of extensions.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    base_url: String,
    extensions: Vec<Extension>,
}

impl StaticRegistry {
    /// Build a catalog from `namespace.name` or `namespace.name@version` ids.
    ///
    /// Entries without a version get [`DEFAULT_VERSION`].
    pub fn from_ids<I, S>(base_url: impl Into<String>, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base_url = base_url.into();
        let extensions = ids
            .into_iter()
            .map(|id| id.as_ref().parse::<ExtensionId>())
            .map(|id| id.map(|id| synthesize(&base_url, id)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            base_url,
            extensions,
        })
    }

    /// Build a catalog from complete extension records, kept in order.
    pub fn from_extensions(base_url: impl Into<String>, extensions: Vec<Extension>) -> Self {
        Self {
            base_url: base_url.into(),
            extensions,
        }
    }

    /// Parse catalog file content. The format comes from the path's extension.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::CatalogParse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message,
        };

        let file: CatalogFile = match extension.as_str() {
            "json" => serde_json::from_str(content).map_err(|e| parse_error("JSON", e.to_string()))?,
            "toml" => toml::from_str(content).map_err(|e| parse_error("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(content).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.clone(),
                });
            }
        };

        let (base_url, entries) = match file {
            CatalogFile::List(entries) => (None, entries),
            CatalogFile::Document {
                base_url,
                extensions,
            } => (base_url, extensions),
        };
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut extensions = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                CatalogEntry::Id(id) => extensions.push(synthesize(&base_url, id.parse()?)),
                CatalogEntry::Record(record) => extensions.push(record),
            }
        }

        tracing::debug!(path = %path.display(), count = extensions.len(), "Loaded catalog");
        Ok(Self {
            base_url,
            extensions,
        })
    }

    /// Read and parse a catalog file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CatalogNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &content)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    fn matches_query(options: &QueryOptions, extension: &Extension) -> bool {
        compare(options.extension_id.as_deref(), &extension.id())
            && compare(options.extension_name.as_deref(), &extension.name)
            && compare(options.extension_version.as_deref(), &extension.version)
            && compare(options.namespace_name.as_deref(), &extension.namespace)
    }

    fn matches_search(options: &SearchOptions, extension: &Extension) -> bool {
        let text_matches = match options.query.as_deref() {
            None => true,
            Some(needle) => {
                includes(needle, Some(&extension.id()))
                    || includes(needle, extension.description.as_deref())
                    || includes(needle, extension.display_name.as_deref())
            }
        };
        let category_matches = match options.category.as_deref() {
            None => true,
            Some(needle) => extension
                .categories
                .iter()
                .any(|category| includes(needle, Some(category))),
        };
        text_matches && category_matches
    }
}

#[async_trait]
impl RegistryClient for StaticRegistry {
    async fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        let extensions = self
            .extensions
            .iter()
            .filter(|extension| Self::matches_query(options, extension))
            .cloned()
            .collect();
        Ok(QueryResult { extensions })
    }

    async fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        let offset = options.offset.unwrap_or(0);
        let size = options.size.unwrap_or(usize::MAX);
        let extensions = self
            .extensions
            .iter()
            .filter(|extension| Self::matches_search(options, extension))
            .skip(offset)
            .take(size)
            .cloned()
            .collect();
        Ok(SearchResult { offset, extensions })
    }
}

fn synthesize(base_url: &str, id: ExtensionId) -> Extension {
    let version = id.version.clone().unwrap_or_else(|| DEFAULT_VERSION.to_string());
    let plain = id.id();
    let mut extension = Extension::new(&id.namespace, &id.name, &version);
    extension.display_name = Some(id.name.clone());
    extension.description = Some(format!("Static catalog entry for {plain}"));
    extension.url = Some(format!(
        "{}/version/{plain}@{version}",
        base_url.trim_end_matches('/')
    ));
    extension
}

/// Case-sensitive; an absent expectation matches anything.
fn compare(expected: Option<&str>, value: &str) -> bool {
    expected.is_none_or(|expected| expected == value)
}

/// Case-insensitive substring test; an absent value never matches.
fn includes(needle: &str, value: Option<&str>) -> bool {
    value.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

//! Router configuration model and loading.
//!
//! The configuration is plain structured data and can be written as JSON,
//! TOML or YAML:
//!
//! ```text
//! {
//!   "registries": { "internal": "https://internal.example/", "public": "https://open-vsx.org/" },
//!   "use": ["internal", "public"],
//!   "filters": {
//!     "requests": [ { "ifRequestContains": "\\bsecret\\b", "use": "internal" } ],
//!     "results":  [ { "ifExtensionIdMatches": "^internal\\.", "use": "internal" } ]
//!   }
//! }
//! ```
//!
//! Filter entries stay loosely typed: every key except `use` is a condition
//! that some registered rule must claim.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Reserved key naming the registries a filter entry routes to.
pub const USE_KEY: &str = "use";

/// One filter entry: condition keys plus `use`.
pub type RuleConfig = serde_json::Map<String, Value>;

/// A single registry key or an ordered list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UseList {
    One(String),
    Many(Vec<String>),
}

impl UseList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(key) => vec![key.clone()],
            Self::Many(keys) => keys.clone(),
        }
    }
}

impl Default for UseList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Evaluated against request options before dispatch.
    #[serde(default)]
    pub requests: Vec<RuleConfig>,
    /// Evaluated against each fetched extension.
    #[serde(default)]
    pub results: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Registry key to endpoint. Endpoints are opaque to the router.
    #[serde(default)]
    pub registries: BTreeMap<String, String>,

    /// Registries to consult, in merge order.
    #[serde(rename = "use")]
    pub use_registries: UseList,

    #[serde(default)]
    pub filters: FiltersConfig,
}

impl RouterConfig {
    /// Read a configuration file. The format comes from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &content)
    }

    /// Parse configuration text, using `path` only to pick the format.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message,
        };

        let config: Self = match extension.as_str() {
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
        tracing::debug!(path = %path.display(), "Loaded router configuration");
        Ok(config)
    }

    /// The `use` list as an ordered vector.
    pub fn use_list(&self) -> Vec<String> {
        self.use_registries.to_vec()
    }

    /// Endpoint handed to the resolver for a registry key.
    ///
    /// Keys without a `registries` entry are passed through unchanged.
    pub fn endpoint<'a>(&'a self, key: &'a str) -> &'a str {
        self.registries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Whether a key may appear in a filter's `use`.
    pub fn knows(&self, key: &str) -> bool {
        self.registries.contains_key(key) || self.use_list().iter().any(|k| k == key)
    }
}

/// Which compiled stage a filter entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    Requests,
    Results,
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requests => f.write_str("requests"),
            Self::Results => f.write_str("results"),
        }
    }
}

/// The registries a matching filter entry routes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySelection {
    /// `use` was `null` or absent: nothing is allowed.
    Disabled,
    Only(Vec<String>),
}

impl RegistrySelection {
    /// Read the `use` key of a filter entry.
    pub fn from_entry(entry: &RuleConfig) -> std::result::Result<Self, String> {
        match entry.get(USE_KEY) {
            None | Some(Value::Null) => Ok(Self::Disabled),
            Some(Value::String(key)) => Ok(Self::Only(vec![key.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(key) => Ok(key.clone()),
                    other => Err(format!("expected a registry key, got {other}")),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::Only),
            Some(other) => Err(format!(
                "expected a registry key, a list of keys or null, got {other}"
            )),
        }
    }

    pub fn allows(&self, key: &str) -> bool {
        match self {
            Self::Disabled => false,
            Self::Only(keys) => keys.iter().any(|k| k == key),
        }
    }

    pub fn keys(&self) -> &[String] {
        match self {
            Self::Disabled => &[],
            Self::Only(keys) => keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    fn entry(value: Value) -> RuleConfig {
        match value {
            Value::Object(map) => map,
            _ => panic!("entry must be an object"),
        }
    }

    #[test]
    fn test_use_accepts_string_or_list() {
        let single: RouterConfig = serde_json::from_str(r#"{"use": "public"}"#).unwrap();
        assert_eq!(single.use_list(), vec!["public"]);

        let many: RouterConfig =
            serde_json::from_str(r#"{"use": ["internal", "public"]}"#).unwrap();
        assert_eq!(many.use_list(), vec!["internal", "public"]);
        assert!(many.filters.requests.is_empty());
        assert!(many.registries.is_empty());
    }

    #[test]
    fn test_use_is_required() {
        assert!(serde_json::from_str::<RouterConfig>(r#"{"registries": {}}"#).is_err());
    }

    #[test]
    fn test_endpoint_falls_back_to_key() {
        let config: RouterConfig = serde_json::from_str(
            r#"{"registries": {"internal": "https://internal/"}, "use": "internal"}"#,
        )
        .unwrap();
        assert_eq!(config.endpoint("internal"), "https://internal/");
        assert_eq!(config.endpoint("https://other/"), "https://other/");
        assert!(config.knows("internal"));
        assert!(!config.knows("public"));
    }

    #[test]
    fn test_selection_shapes() {
        assert_eq!(
            RegistrySelection::from_entry(&entry(json!({"use": null}))),
            Ok(RegistrySelection::Disabled)
        );
        assert_eq!(
            RegistrySelection::from_entry(&entry(json!({"ifRequestContains": "x"}))),
            Ok(RegistrySelection::Disabled)
        );
        assert_eq!(
            RegistrySelection::from_entry(&entry(json!({"use": "internal"}))),
            Ok(RegistrySelection::Only(vec!["internal".to_string()]))
        );
        assert_eq!(
            RegistrySelection::from_entry(&entry(json!({"use": ["a", "b"]}))),
            Ok(RegistrySelection::Only(vec!["a".to_string(), "b".to_string()]))
        );
        assert!(RegistrySelection::from_entry(&entry(json!({"use": 3}))).is_err());
        assert!(RegistrySelection::from_entry(&entry(json!({"use": ["a", 1]}))).is_err());
    }

    #[test]
    fn test_selection_allows() {
        let only = RegistrySelection::Only(vec!["internal".to_string()]);
        assert!(only.allows("internal"));
        assert!(!only.allows("public"));
        assert!(!RegistrySelection::Disabled.allows("internal"));
        assert!(RegistrySelection::Disabled.keys().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config = RouterConfig::parse(
            &PathBuf::from("router.toml"),
            r#"
use = ["internal", "public"]

[registries]
internal = "internal.json"
public = "public.json"

[[filters.requests]]
ifRequestContains = '\btestFullStop\b'

[[filters.results]]
ifExtensionIdMatches = '^some\.'
use = "internal"
"#,
        )
        .unwrap();
        assert_eq!(config.registries["public"], "public.json");
        assert_eq!(config.filters.requests.len(), 1);
        assert_eq!(
            RegistrySelection::from_entry(&config.filters.requests[0]),
            Ok(RegistrySelection::Disabled)
        );
        assert_eq!(
            config.filters.results[0]["ifExtensionIdMatches"],
            json!(r"^some\.")
        );
    }

    #[test]
    fn test_parse_yaml() {
        let config = RouterConfig::parse(
            &PathBuf::from("router.yml"),
            "use: public\nfilters:\n  requests:\n    - ifRequestContains: secret\n      use: null\n",
        )
        .unwrap();
        assert_eq!(config.use_list(), vec!["public"]);
        assert_eq!(config.filters.requests[0]["use"], Value::Null);
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        let err = RouterConfig::parse(&PathBuf::from("router.ini"), "").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RouterConfig::load(&PathBuf::from("/nonexistent/router.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}

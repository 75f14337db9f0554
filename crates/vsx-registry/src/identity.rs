//! Extension identity and catalog entries.
//!
//! An extension is identified by `namespace.name`, optionally pinned to a
//! version as `namespace.name@version`. Neither the namespace nor the name may
//! contain a `.`, so the first `.` is always the namespace boundary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed `namespace.name[@version]` identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId {
    pub namespace: String,
    pub name: String,
    pub version: Option<String>,
}

impl ExtensionId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Pin the identity to a concrete version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Canonical unversioned form: `namespace.name`.
    pub fn id(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// `namespace.name@version`, or the plain id when no version is set.
    pub fn versioned_id(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.id(), version),
            None => self.id(),
        }
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.versioned_id())
    }
}

impl FromStr for ExtensionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidExtensionId {
            id: s.to_string(),
            reason: reason.to_string(),
        };

        let (id, version) = match s.split_once('@') {
            Some((id, version)) => {
                if version.is_empty() {
                    return Err(invalid("empty version"));
                }
                (id, Some(version.to_string()))
            }
            None => (s, None),
        };

        let (namespace, name) = id
            .split_once('.')
            .ok_or_else(|| invalid("expected 'namespace.name'"))?;

        if namespace.is_empty() || name.is_empty() {
            return Err(invalid("namespace and name must not be empty"));
        }
        if name.contains('.') {
            return Err(invalid("name must not contain '.'"));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            version,
        })
    }
}

/// A published extension as returned by a registry.
///
/// The router only inspects the identity fields; the rest is carried through
/// untouched so callers can render results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub namespace: String,
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Registry page for this exact version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub download_count: u64,
}

impl Extension {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
            display_name: None,
            description: None,
            categories: Vec::new(),
            url: None,
            download_count: 0,
        }
    }

    pub fn id(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn versioned_id(&self) -> String {
        format!("{}@{}", self.id(), self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("some.a", "some", "a", None)]
    #[case("some.a@1.0.0", "some", "a", Some("1.0.0"))]
    #[case("testFullStop.c", "testFullStop", "c", None)]
    #[case("ms-python.python@2024.1.0-beta", "ms-python", "python", Some("2024.1.0-beta"))]
    fn test_parse_valid(
        #[case] input: &str,
        #[case] namespace: &str,
        #[case] name: &str,
        #[case] version: Option<&str>,
    ) {
        let id: ExtensionId = input.parse().unwrap();
        assert_eq!(id.namespace, namespace);
        assert_eq!(id.name, name);
        assert_eq!(id.version.as_deref(), version);
        assert_eq!(id.to_string(), input);
    }

    #[rstest]
    #[case("noseparator")]
    #[case(".name")]
    #[case("namespace.")]
    #[case("a.b.c")]
    #[case("some.a@")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = input.parse::<ExtensionId>().unwrap_err();
        assert!(matches!(err, Error::InvalidExtensionId { .. }), "{err}");
    }

    #[test]
    fn test_extension_ids() {
        let ext = Extension::new("some", "a", "1.0.0");
        assert_eq!(ext.id(), "some.a");
        assert_eq!(ext.versioned_id(), "some.a@1.0.0");
    }

    #[test]
    fn test_extension_deserializes_camel_case() {
        let ext: Extension = serde_json::from_str(
            r#"{"namespace":"other","name":"d","version":"0.0.1","displayName":"D","downloadCount":3}"#,
        )
        .unwrap();
        assert_eq!(ext.display_name.as_deref(), Some("D"));
        assert_eq!(ext.download_count, 3);
        assert!(ext.categories.is_empty());
    }
}

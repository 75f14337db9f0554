//! End-to-end tests for the routing slice
//!
//! These tests exercise the complete flow: configuration file -> catalog
//! resolution -> filter compilation -> federated query/search.

use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use vsx_registry::{
    CatalogFileResolver, Extension, MapResolver, QueryOptions, RegistryClient, SearchOptions,
    StaticRegistry,
};
use vsx_router::{RouterClient, RouterConfig, RouterRules};
use vsx_test_utils::{ids, versioned_ids};

/// Three catalogs and a YAML router config that splits traffic between them.
fn setup_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();

    fs::write(
        temp.path().join("mirror.yaml"),
        r#"
baseUrl: https://mirror.corp.example/
extensions:
  - redhat.java@1.30.0
  - corp.linter@2.1.0
  - corp.snippets@0.4.0
"#,
    )
    .unwrap();

    fs::write(
        temp.path().join("open-vsx.json"),
        r#"{
            "baseUrl": "https://open-vsx.org/",
            "extensions": [
                "redhat.java@1.31.0",
                "redhat.vscode-yaml@1.14.0",
                "corp.linter@9.9.9",
                {
                    "namespace": "dracula-theme",
                    "name": "theme-dracula",
                    "version": "2.25.1",
                    "displayName": "Dracula Official",
                    "categories": ["Themes"]
                }
            ]
        }"#,
    )
    .unwrap();

    fs::write(
        temp.path().join("staging.toml"),
        r#"
baseUrl = "https://staging.corp.example/"
extensions = ["corp.linter@3.0.0-rc.1", "corp.experimental@0.0.1"]
"#,
    )
    .unwrap();

    fs::write(
        temp.path().join("router.yaml"),
        r#"
registries:
  mirror: mirror.yaml
  public: open-vsx.json
  staging: staging.toml
use: [mirror, staging, public]
filters:
  requests:
    # nobody asks the public registry about corp extensions
    - ifRequestContains: '\bcorp\b'
      use: [mirror, staging]
    # experimental builds are only served by staging
    - ifRequestContains: '\bexperimental\b'
      use: staging
  results:
    # corp.* is only trusted from the mirror
    - ifExtensionIdMatches: '^corp\.'
      use: mirror
"#,
    )
    .unwrap();

    temp
}

async fn load_router(temp: &TempDir) -> RouterClient {
    let config = RouterConfig::load(&temp.path().join("router.yaml")).unwrap();
    let resolver = CatalogFileResolver::new(temp.path());
    RouterClient::from_config(&config, &resolver, &RouterRules::builtin())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_corp_requests_stay_internal() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;

    let result = router
        .query(&QueryOptions::new().with_namespace("corp"))
        .await
        .unwrap();
    // staging's corp.* is dropped by the result filter, public is never asked
    assert_eq!(
        versioned_ids(&result.extensions),
        vec!["corp.linter@2.1.0", "corp.snippets@0.4.0"]
    );
}

#[tokio::test]
async fn test_experimental_request_narrows_to_intersection() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;

    // Both request rules match: {mirror, staging} ∩ {staging} = {staging},
    // and the result filter then rejects staging's corp.* entries.
    let result = router
        .query(&QueryOptions::new().with_extension_id("corp.experimental"))
        .await
        .unwrap();
    assert!(result.extensions.is_empty());
}

#[tokio::test]
async fn test_public_requests_merge_in_use_order() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;

    let result = router
        .query(&QueryOptions::new().with_extension_id("redhat.java"))
        .await
        .unwrap();
    assert_eq!(
        versioned_ids(&result.extensions),
        vec!["redhat.java@1.30.0", "redhat.java@1.31.0"]
    );
}

#[tokio::test]
async fn test_search_by_category_reaches_public() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;

    let result = router
        .search(&SearchOptions::new().with_category("themes"))
        .await
        .unwrap();
    assert_eq!(ids(&result.extensions), vec!["dracula-theme.theme-dracula"]);
    assert_eq!(
        result.extensions[0].display_name.as_deref(),
        Some("Dracula Official")
    );
}

#[tokio::test]
async fn test_search_pagination_is_per_registry() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;

    let result = router
        .search(&SearchOptions::new().with_query("redhat").with_size(1))
        .await
        .unwrap();
    // one entry from the mirror, one from public
    assert_eq!(
        versioned_ids(&result.extensions),
        vec!["redhat.java@1.30.0", "redhat.java@1.31.0"]
    );
    assert_eq!(result.offset, 0);
}

#[tokio::test]
async fn test_in_memory_and_file_catalogs_agree() {
    let temp = setup_workspace();
    let from_files = load_router(&temp).await;

    let mirror = StaticRegistry::load(&temp.path().join("mirror.yaml")).await.unwrap();
    let public = StaticRegistry::load(&temp.path().join("open-vsx.json")).await.unwrap();
    let staging = StaticRegistry::load(&temp.path().join("staging.toml")).await.unwrap();
    let resolver = MapResolver::new()
        .with("mirror.yaml", Arc::new(mirror))
        .with("open-vsx.json", Arc::new(public))
        .with("staging.toml", Arc::new(staging));
    let config = RouterConfig::load(&temp.path().join("router.yaml")).unwrap();
    let in_memory = RouterClient::from_config(&config, &resolver, &RouterRules::builtin())
        .await
        .unwrap();

    for options in [
        QueryOptions::default(),
        QueryOptions::new().with_namespace("corp"),
        QueryOptions::new().with_extension_name("java"),
    ] {
        let a = from_files.query(&options).await.unwrap();
        let b = in_memory.query(&options).await.unwrap();
        assert_eq!(a, b, "diverged for {options:?}");
    }
}

#[tokio::test]
async fn test_all_entries_carry_catalog_urls() {
    let temp = setup_workspace();
    let router = load_router(&temp).await;
    let result = router
        .query(&QueryOptions::new().with_extension_name("linter"))
        .await
        .unwrap();

    let urls: Vec<&str> = result
        .extensions
        .iter()
        .filter_map(|ext: &Extension| ext.url.as_deref())
        .collect();
    // staging's and public's corp.linter are filtered out
    assert_eq!(
        urls,
        vec!["https://mirror.corp.example/version/corp.linter@2.1.0"]
    );
}

//! The `internal`/`public` routing scenario.
//!
//! - `internal` serves `some.a@1.0.0`, `other.d`, `secret.x`, `secret.y`, `secret.z`
//! - `public` serves `some.a@2.0.0`, `some.b`, `other.e`, `testFullStop.c`, `secret.w`
//!
//! Requests mentioning `testFullStop` go nowhere, requests mentioning `secret`
//! only go to `internal`, and `some.*` results are only accepted from
//! `internal`.

use std::path::Path;
use std::sync::Arc;
use vsx_registry::{MapResolver, RegistryClient, StaticRegistry};
use vsx_router::{RouterClient, RouterConfig, RouterRules};

pub const INTERNAL: &str = "internal";
pub const PUBLIC: &str = "public";
pub const INTERNAL_URL: &str = "https://internal.testdomain/";
pub const PUBLIC_URL: &str = "https://public.testdomain/";

pub const INTERNAL_IDS: [&str; 5] = ["some.a@1.0.0", "other.d", "secret.x", "secret.y", "secret.z"];
pub const PUBLIC_IDS: [&str; 5] = [
    "some.a@2.0.0",
    "some.b",
    "other.e",
    "testFullStop.c",
    "secret.w",
];

pub fn internal_registry() -> StaticRegistry {
    StaticRegistry::from_ids(INTERNAL_URL, INTERNAL_IDS).expect("valid internal catalog")
}

pub fn public_registry() -> StaticRegistry {
    StaticRegistry::from_ids(PUBLIC_URL, PUBLIC_IDS).expect("valid public catalog")
}

/// Resolver keyed by endpoint URL, serving both scenario registries.
pub fn resolver() -> MapResolver {
    resolver_with(Arc::new(internal_registry()), Arc::new(public_registry()))
}

/// Resolver serving the given clients at the scenario endpoints.
pub fn resolver_with(
    internal: Arc<dyn RegistryClient>,
    public: Arc<dyn RegistryClient>,
) -> MapResolver {
    MapResolver::new()
        .with(INTERNAL_URL, internal)
        .with(PUBLIC_URL, public)
}

/// Scenario configuration as JSON, with both registries in `use`.
pub fn config_json() -> serde_json::Value {
    serde_json::json!({
        "registries": {
            "internal": INTERNAL_URL,
            "public": PUBLIC_URL
        },
        "use": ["internal", "public"],
        "filters": {
            "requests": [
                { "ifRequestContains": "\\btestFullStop\\b", "use": null },
                { "ifRequestContains": "\\bsecret\\b", "use": "internal" }
            ],
            "results": [
                { "ifExtensionIdMatches": "^some\\.", "use": "internal" }
            ]
        }
    })
}

pub fn config() -> RouterConfig {
    serde_json::from_value(config_json()).expect("valid scenario config")
}

/// Router over the scenario registries with the built-in rules.
pub async fn router() -> RouterClient {
    RouterClient::from_config(&config(), &resolver(), &RouterRules::builtin())
        .await
        .expect("scenario router builds")
}

/// Write the scenario as files: `router.json`, `internal.json`, `public.json`.
///
/// Registry endpoints in the written config are the catalog file names.
pub fn write_files(dir: &Path) -> std::io::Result<()> {
    let mut config = config_json();
    config["registries"] = serde_json::json!({
        "internal": "internal.json",
        "public": "public.json"
    });
    std::fs::write(dir.join("router.json"), serde_json::to_string_pretty(&config)?)?;

    let catalog = |base_url: &str, ids: &[&str]| {
        serde_json::to_string_pretty(&serde_json::json!({
            "baseUrl": base_url,
            "extensions": ids
        }))
    };
    std::fs::write(dir.join("internal.json"), catalog(INTERNAL_URL, &INTERNAL_IDS[..])?)?;
    std::fs::write(dir.join("public.json"), catalog(PUBLIC_URL, &PUBLIC_IDS[..])?)?;
    Ok(())
}

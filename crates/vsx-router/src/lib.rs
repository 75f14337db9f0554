//! Federated registry routing.
//!
//! A [`RouterClient`] presents several [`vsx_registry::RegistryClient`]s as
//! one. A declarative [`RouterConfig`] decides, per request, which registries
//! are consulted (request filters) and which of their entries survive
//! (result filters). Filter rules are compiled once, when the router is built.
//!
//! ```no_run
//! use vsx_registry::{MapResolver, QueryOptions, RegistryClient};
//! use vsx_router::{RouterClient, RouterConfig, RouterRules};
//!
//! # async fn run(resolver: MapResolver) -> Result<(), Box<dyn std::error::Error>> {
//! let config: RouterConfig = serde_json::from_str(
//!     r#"{
//!         "registries": { "internal": "https://internal.example/", "public": "https://open-vsx.org/" },
//!         "use": ["internal", "public"],
//!         "filters": {
//!             "requests": [{ "ifRequestContains": "\\bsecret\\b", "use": "internal" }]
//!         }
//!     }"#,
//! )?;
//! let router = RouterClient::from_config(&config, &resolver, &RouterRules::builtin()).await?;
//! let result = router.query(&QueryOptions::new().with_namespace("secret")).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod router;
pub mod rules;

pub use config::{FilterStage, FiltersConfig, RegistrySelection, RouterConfig, RuleConfig, UseList};
pub use error::{Error, Result};
pub use filter::{Filter, PatternMatcher, extension_id_matches, request_contains};
pub use router::RouterClient;
pub use rules::{
    ConditionRule, EXTENSION_ID_MATCHES, FilterRule, REQUEST_CONTAINS, RouterRules, RuleCompiler,
};

//! Command implementations

mod check;
mod query;
mod search;

pub use check::run_check;
pub use query::run_query;
pub use search::run_search;

use std::path::Path;
use vsx_registry::{CatalogFileResolver, Extension};
use vsx_router::{RouterClient, RouterConfig, RouterRules};

use crate::error::Result;

/// Build a router from a configuration file.
///
/// Registry endpoints are catalog files resolved next to the configuration.
pub(crate) async fn load_router(config_path: &Path) -> Result<RouterClient> {
    let config = RouterConfig::load(config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let resolver = CatalogFileResolver::new(base_dir);
    let router = RouterClient::from_config(&config, &resolver, &RouterRules::builtin()).await?;
    Ok(router)
}

/// Print one `namespace.name@version` per line.
pub(crate) fn print_extensions(extensions: &[Extension]) {
    for extension in extensions {
        println!("{}", extension.versioned_id());
    }
    tracing::debug!(count = extensions.len(), "Printed extensions");
}

//! `vsx search`

use std::path::Path;
use vsx_registry::{RegistryClient, SearchOptions};

use super::{load_router, print_extensions};
use crate::error::Result;

/// Run the search command
pub async fn run_search(config_path: &Path, options: &SearchOptions, json: bool) -> Result<()> {
    let router = load_router(config_path).await?;
    let result = router.search(options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_extensions(&result.extensions);
    }
    Ok(())
}

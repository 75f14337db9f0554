//! `vsx query`

use std::path::Path;
use vsx_registry::{QueryOptions, RegistryClient};

use super::{load_router, print_extensions};
use crate::error::Result;

/// Run the query command
pub async fn run_query(config_path: &Path, options: &QueryOptions, json: bool) -> Result<()> {
    let router = load_router(config_path).await?;
    let result = router.query(options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_extensions(&result.extensions);
    }
    Ok(())
}

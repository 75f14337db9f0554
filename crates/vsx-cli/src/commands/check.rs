//! `vsx check`

use colored::Colorize;
use std::path::Path;

use super::load_router;
use crate::error::Result;

/// Run the check command
///
/// Building the router compiles every filter and resolves every registry,
/// so any configuration error surfaces here.
pub async fn run_check(config_path: &Path) -> Result<()> {
    let router = load_router(config_path).await?;

    println!(
        "{} {}",
        "Configuration OK:".green().bold(),
        config_path.display()
    );
    println!(
        "  {:<16} {}",
        "registries".cyan(),
        router.registry_keys().collect::<Vec<_>>().join(", ")
    );
    println!(
        "  {:<16} {}",
        "request filters".cyan(),
        router.request_filter_count()
    );
    println!(
        "  {:<16} {}",
        "result filters".cyan(),
        router.result_filter_count()
    );
    Ok(())
}

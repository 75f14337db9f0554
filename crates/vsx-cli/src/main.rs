//! VSX router CLI
//!
//! Runs queries and searches through a router configuration whose registries
//! are static catalog files.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;
use vsx_registry::{QueryOptions, SearchOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    execute_command(cli.command).await
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Query {
            config,
            id,
            name,
            ext_version,
            namespace,
            json,
        } => {
            let options = QueryOptions {
                extension_id: id,
                extension_name: name,
                extension_version: ext_version,
                namespace_name: namespace,
            };
            commands::run_query(&config.config, &options, json).await
        }
        Commands::Search {
            config,
            query,
            category,
            offset,
            size,
            json,
        } => {
            let options = SearchOptions {
                query,
                category,
                offset,
                size,
            };
            commands::run_search(&config.config, &options, json).await
        }
        Commands::Check { config } => commands::run_check(&config.config).await,
    }
}

//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Federated extension registry router
#[derive(Parser, Debug)]
#[command(name = "vsx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Router configuration shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigArg {
    /// Router configuration file (.json, .toml, .yaml)
    ///
    /// Registry endpoints are catalog files, relative to this file.
    #[arg(short, long, env = "VSX_ROUTER_CONFIG")]
    pub config: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Look up extensions by exact identity
    ///
    /// Examples:
    ///   vsx query -c router.json --namespace redhat
    ///   vsx query -c router.json --id redhat.java --ext-version 1.2.0
    Query {
        #[command(flatten)]
        config: ConfigArg,

        /// Extension id (`namespace.name`)
        #[arg(long)]
        id: Option<String>,

        /// Extension name
        #[arg(long)]
        name: Option<String>,

        /// Extension version
        #[arg(long = "ext-version", value_name = "VERSION")]
        ext_version: Option<String>,

        /// Namespace name
        #[arg(long)]
        namespace: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Search extensions by text or category
    Search {
        #[command(flatten)]
        config: ConfigArg,

        /// Text to look for in ids, names and descriptions
        query: Option<String>,

        /// Category to filter on
        #[arg(long)]
        category: Option<String>,

        /// Entries to skip in each registry
        #[arg(long)]
        offset: Option<usize>,

        /// Maximum entries per registry
        #[arg(long)]
        size: Option<usize>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and resolve every registry
    Check {
        #[command(flatten)]
        config: ConfigArg,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::parse_from(["vsx", "query", "-c", "router.json", "--namespace", "other"]);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Query {
                config,
                namespace,
                id,
                json,
                ..
            } => {
                assert_eq!(config.config, PathBuf::from("router.json"));
                assert_eq!(namespace.as_deref(), Some("other"));
                assert!(id.is_none());
                assert!(!json);
            }
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_with_pagination() {
        let cli = Cli::parse_from([
            "vsx", "-v", "search", "-c", "r.yaml", "some.", "--offset", "2", "--size", "5",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Search {
                config: ConfigArg {
                    config: PathBuf::from("r.yaml")
                },
                query: Some("some.".to_string()),
                category: None,
                offset: Some(2),
                size: Some(5),
                json: false,
            }
        );
    }
}

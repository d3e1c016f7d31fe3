//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for unidb using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Unidb - Universal Database Adapter Registry
#[derive(Parser, Debug)]
#[command(name = "unidb")]
#[command(version, about, long_about = None)]
#[command(author = "Unidb Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "unidb.toml", env = "UNIDB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "UNIDB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered database engines
    List(commands::list::ListArgs),

    /// Show what an adapter renders for a configuration
    Describe(commands::describe::DescribeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Generate a compose file for the configured databases
    Compose(commands::compose::ComposeArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["unidb", "list"]);
        assert_eq!(cli.config, "unidb.toml");
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["unidb", "--config", "custom.toml", "list"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["unidb", "--log-level", "debug", "list"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_describe() {
        let cli = Cli::parse_from([
            "unidb",
            "describe",
            "redis",
            "--password",
            "pw",
            "--tls",
            "--dimension",
            "384",
        ]);
        match cli.command {
            Commands::Describe(args) => {
                assert_eq!(args.engine, "redis");
                assert_eq!(args.password, "pw");
                assert!(args.tls);
                assert_eq!(args.dimension, 384);
                assert!(!args.show_secrets);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["unidb", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_compose() {
        let cli = Cli::parse_from(["unidb", "compose", "--output", "stack.yml"]);
        match cli.command {
            Commands::Compose(args) => assert_eq!(args.output, "stack.yml"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["unidb", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}

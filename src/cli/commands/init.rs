//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "unidb.toml")]
    pub output: String,

    /// Include an entry for every built-in engine
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing unidb configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your databases", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set UNIDB_PG_PASSWORD and UNIDB_REDIS_PASSWORD");
                println!("  3. Validate configuration: unidb validate-config");
                println!("  4. Generate a compose file: unidb compose");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# unidb Configuration File
# Universal Database Adapter Registry

[application]
log_level = "info"

[registry]
llm_fallback = false

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"

[[databases]]
name = "vectors"
engine_type = "postgresql"
database_name = "rag"
username = "rag_user"
password = "${UNIDB_PG_PASSWORD}"

[[databases]]
name = "cache"
engine_type = "redis"
database_name = "0"
password = "${UNIDB_REDIS_PASSWORD}"
"#
        .to_string()
    }

    /// Generate configuration with an entry for every built-in engine
    fn generate_config_with_examples() -> String {
        r#"# unidb Configuration File
# Universal Database Adapter Registry
#
# Every [[databases]] entry becomes one compose service. Values written as
# ${VAR} are read from the environment (or a .env file) when loading.

[application]
# trace | debug | info | warn | error (override: UNIDB_APPLICATION_LOG_LEVEL)
log_level = "info"

[registry]
# Hand unknown engine types to the adapter synthesizer instead of failing
# immediately (override: UNIDB_REGISTRY_LLM_FALLBACK)
llm_fallback = false

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"

# Relational store with pgvector
[[databases]]
name = "vectors"
engine_type = "postgresql"
database_name = "rag"
host = "localhost"
# 0 selects the engine default (5432)
port = 0
username = "rag_user"
password = "${UNIDB_PG_PASSWORD}"
tls_enabled = false
connection_pool_size = 10
query_timeout_seconds = 30
# Empty selects the engine default image
container_image = ""

[[databases]]
name = "documents"
engine_type = "mongodb"
database_name = "content"
username = "admin"
password = "${UNIDB_MONGO_PASSWORD}"

[[databases]]
name = "orders"
engine_type = "mysql"
database_name = "shop"
username = "shop"
password = "${UNIDB_MYSQL_PASSWORD}"

[[databases]]
name = "analytics"
engine_type = "clickhouse"
database_name = "events"
username = "default"
password = "${UNIDB_CLICKHOUSE_PASSWORD}"

# For Redis the database name is the numeric database index
[[databases]]
name = "cache"
engine_type = "redis"
database_name = "0"
password = "${UNIDB_REDIS_PASSWORD}"

[[databases]]
name = "search"
engine_type = "elasticsearch"
database_name = "articles"
username = "elastic"
password = "${UNIDB_ELASTIC_PASSWORD}"
container_image = "docker.elastic.co/elasticsearch/elasticsearch:8.11.0"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "unidb.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "unidb.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[registry]"));
        assert!(config.contains("[[databases]]"));
    }

    #[test]
    fn test_generated_configs_parse() {
        // No ${VAR} references, so substitution does not depend on the environment
        let minimal = InitArgs::generate_minimal_config().replace("${", "{");
        let config = parse_config(&minimal).unwrap();
        assert_eq!(config.databases.len(), 2);

        let full = InitArgs::generate_config_with_examples().replace("${", "{");
        let config = parse_config(&full).unwrap();
        let engines: Vec<&str> = config
            .databases
            .iter()
            .map(|d| d.config.engine_type())
            .collect();
        assert_eq!(
            engines,
            vec!["postgresql", "mongodb", "mysql", "clickhouse", "redis", "elasticsearch"]
        );
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unidb.toml");
        fs::write(&path, "# existing").unwrap();

        let mut args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        args.force = true;
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[[databases]]"));
    }
}

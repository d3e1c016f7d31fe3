//! Describe command implementation
//!
//! This module implements the `describe` command, which resolves an adapter
//! for a configuration given on the command line and prints everything it
//! renders.

use super::registry_for;
use crate::config::DatabaseConfig;
use crate::export::summary::{redacted_connection_string, redacted_descriptor};
use clap::Args;

/// Arguments for the describe command
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Engine type (e.g. postgresql, redis)
    pub engine: String,

    /// Database, index or keyspace name
    #[arg(long, default_value = "unidb")]
    pub database: String,

    /// Host name
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Port (0 selects the engine default)
    #[arg(long, default_value_t = 0)]
    pub port: u32,

    /// User name
    #[arg(long, default_value = "admin")]
    pub username: String,

    /// Password
    #[arg(long, default_value = "password")]
    pub password: String,

    /// Enable TLS in the connection string
    #[arg(long)]
    pub tls: bool,

    /// Table, collection or index for the vector DDL
    #[arg(long, default_value = "documents")]
    pub table: String,

    /// Vector field name for the vector DDL
    #[arg(long, default_value = "embedding")]
    pub field: String,

    /// Vector dimension for the vector DDL
    #[arg(long, default_value_t = 1536)]
    pub dimension: usize,

    /// Print passwords instead of redacting them
    #[arg(long)]
    pub show_secrets: bool,
}

impl DescribeArgs {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.engine.as_str(), self.database.as_str())
            .with_host(self.host.as_str())
            .with_port(self.port)
            .with_credentials(self.username.as_str(), self.password.as_str())
            .with_tls(self.tls)
    }

    /// Execute the describe command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(engine_type = %self.engine, "Describing adapter");

        let registry = match registry_for(config_path) {
            Ok(registry) => registry,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let adapter = match registry.get_adapter(&self.engine, self.database_config()) {
            Ok(adapter) => adapter,
            Err(e) => {
                println!("❌ {e}");
                println!(
                    "   Available: {}",
                    registry.list_available_adapters().join(", ")
                );
                return Ok(2);
            }
        };

        println!("🔎 {} ({})", adapter.engine_type(), adapter.implementation_name());
        println!();

        let (valid, errors) = adapter.config().validate();
        if !valid {
            println!("⚠️  Configuration warnings:");
            for error in &errors {
                println!("   - {error}");
            }
            println!();
        }

        let connection_string = if self.show_secrets {
            adapter.connection_string()
        } else {
            redacted_connection_string(&*adapter)
        };
        let descriptor = if self.show_secrets {
            adapter.container_descriptor()
        } else {
            redacted_descriptor(&*adapter)
        };

        println!("Connection String: {connection_string}");
        println!("Health Check: {}", adapter.health_check_command());
        println!();
        println!("Container:");
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        println!();

        if adapter.supports_vector_search() {
            if let Some(kind) = adapter.vector_search_kind() {
                println!("Vector Search: {kind}");
            }
            println!(
                "{}",
                adapter.vector_index_ddl(&self.table, &self.field, self.dimension)
            );
        } else {
            println!("Vector Search: not supported");
        }
        println!();
        Ok(0)
    }
}

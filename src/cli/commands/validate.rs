//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the unidb configuration file and every database entry in it.

use crate::adapters::AdapterRegistry;
use crate::config::{load_config, ServiceDatabase};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let registry = AdapterRegistry::from_config(&config.registry);
        let mut invalid = 0;

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Adapter Synthesis: {}", config.registry.llm_fallback);
        println!("  Databases: {}", config.databases.len());
        println!();

        for database in &config.databases {
            let errors = database_errors(&registry, database);
            if errors.is_empty() {
                println!("✅ {} ({})", database.name, database.config.engine_type());
            } else {
                invalid += 1;
                println!("❌ {} ({})", database.name, database.config.engine_type());
                for error in &errors {
                    println!("   - {error}");
                }
            }
        }
        println!();

        if invalid > 0 {
            tracing::warn!(invalid, "Configuration has invalid database entries");
            println!("❌ Configuration validation failed: {invalid} invalid database entries");
            println!();
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        Ok(0)
    }
}

/// Collects every problem with one `[[databases]]` entry
///
/// Entries for registered engines are checked after the adapter has applied
/// its defaults, so an omitted port or image is not reported. Entries for
/// unknown engines get no defaults: every `validate()` finding is reported,
/// followed by the unsupported engine.
fn database_errors(registry: &AdapterRegistry, database: &ServiceDatabase) -> Vec<String> {
    let engine_type = database.config.engine_type();
    if !registry.is_registered(engine_type) {
        let (_, mut errors) = database.config.validate();
        errors.push(format!("Database type '{engine_type}' not supported"));
        return errors;
    }

    match registry.get_adapter(engine_type, database.config.clone()) {
        Ok(adapter) => adapter.config().validate().1,
        Err(e) => vec![e.to_string()],
    }
}

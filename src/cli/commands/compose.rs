//! Compose command implementation
//!
//! This module implements the `compose` command, which resolves an adapter
//! for every configured database and writes a compose file.

use crate::adapters::{AdapterRegistry, DatabaseAdapter};
use crate::config::load_config;
use crate::export::{build_compose, AdapterSummary};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the compose command
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Path of the compose file to write
    #[arg(short, long, default_value = "docker-compose.yml")]
    pub output: String,

    /// Directory to write one adapter summary per service into
    #[arg(long)]
    pub summaries: Option<String>,
}

impl ComposeArgs {
    /// Execute the compose command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, output = %self.output, "Generating compose file");

        println!("🐳 Generating compose file from {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if config.databases.is_empty() {
            println!("❌ No [[databases]] entries in {config_path}");
            return Ok(2);
        }

        let registry = AdapterRegistry::from_config(&config.registry);
        let mut adapters: Vec<(&str, Box<dyn DatabaseAdapter>)> = Vec::new();
        for database in &config.databases {
            match registry.get_adapter(database.config.engine_type(), database.config.clone()) {
                Ok(adapter) => {
                    println!(
                        "  {} → {} ({})",
                        database.name,
                        adapter.engine_type(),
                        adapter.config().container_image
                    );
                    adapters.push((database.name.as_str(), adapter));
                }
                Err(e) => {
                    println!("❌ {}: {e}", database.name);
                    return Ok(2);
                }
            }
        }
        println!();

        let compose = build_compose(adapters.iter().map(|(name, adapter)| (*name, &**adapter)));
        if let Err(e) = compose.write(&self.output) {
            println!("❌ Failed to write compose file");
            println!("   Error: {e}");
            return Ok(5);
        }
        println!("✅ Compose file created: {}", self.output);

        if let Some(dir) = &self.summaries {
            if let Err(e) = write_summaries(Path::new(dir), &adapters) {
                println!("❌ Failed to write adapter summaries");
                println!("   Error: {e}");
                return Ok(5);
            }
            println!("✅ Adapter summaries written to: {dir}");
        }
        println!();
        Ok(0)
    }
}

fn write_summaries(
    dir: &Path,
    adapters: &[(&str, Box<dyn DatabaseAdapter>)],
) -> crate::domain::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, adapter) in adapters {
        AdapterSummary::from_adapter(&**adapter).write(dir.join(format!("{name}.json")))?;
    }
    Ok(())
}

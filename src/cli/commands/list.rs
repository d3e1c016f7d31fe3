//! List command implementation
//!
//! This module implements the `list` command, which prints every registered
//! engine type with its implementation and defaults.

use super::registry_for;
use crate::config::DatabaseConfig;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print only the engine type names
    #[arg(short, long)]
    pub quiet: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let registry = match registry_for(config_path) {
            Ok(registry) => registry,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let engines = registry.list_available_adapters();
        tracing::info!(count = engines.len(), "Listing registered adapters");

        if self.quiet {
            for engine in &engines {
                println!("{engine}");
            }
            return Ok(0);
        }

        println!("📚 Registered database adapters ({})", engines.len());
        println!();
        for engine in &engines {
            let info = registry.get_adapter_info(engine)?;
            let adapter = registry.get_adapter(engine, DatabaseConfig::new(engine.as_str(), ""))?;
            let defaults = adapter.config();

            println!("  {engine}");
            println!("    Adapter: {}", info.implementation_name);
            if !info.description.is_empty() {
                println!("    Description: {}", info.description);
            }
            println!("    Default Port: {}", defaults.port);
            println!("    Default Image: {}", defaults.container_image);
            match adapter.vector_search_kind() {
                Some(kind) => println!("    Vector Search: {kind}"),
                None => println!("    Vector Search: no"),
            }
        }
        if registry.fallback_enabled() {
            println!();
            println!("  Unknown engine types are passed to the adapter synthesizer");
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_without_config_file() {
        let args = ListArgs { quiet: true };
        let code = args.execute("/nonexistent/unidb.toml").unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_list_with_invalid_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[application]\nlog_level = \"loud\"\n").unwrap();

        let args = ListArgs { quiet: false };
        let code = args.execute(file.path().to_str().unwrap()).unwrap();
        assert_eq!(code, 2);
    }
}

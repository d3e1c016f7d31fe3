//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod compose;
pub mod describe;
pub mod init;
pub mod list;
pub mod validate;

use crate::adapters::AdapterRegistry;
use crate::config::load_config;
use std::path::Path;

/// Builds the registry for commands that can run without a configuration file
///
/// When the file exists its `[registry]` section is honoured; otherwise the
/// built-in registry is used.
pub(crate) fn registry_for(config_path: &str) -> crate::domain::Result<AdapterRegistry> {
    if !Path::new(config_path).exists() {
        tracing::debug!(config_path = %config_path, "No configuration file, using built-in registry");
        return Ok(AdapterRegistry::new());
    }
    let config = load_config(config_path)?;
    Ok(AdapterRegistry::from_config(&config.registry))
}

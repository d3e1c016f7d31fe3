//! Configuration schema types
//!
//! This module defines the structure of the `unidb.toml` file.

use crate::config::database::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main unidb configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UnidbConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Adapter registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Database services to describe
    #[serde(default)]
    pub databases: Vec<ServiceDatabase>,
}

impl UnidbConfig {
    /// Validates the structure of the configuration
    ///
    /// Per-database rules (ports, pool sizes, images) are not checked here;
    /// they are reported by [`DatabaseConfig::validate`] and are advisory.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.logging.validate()?;

        let mut seen = HashSet::new();
        for database in &self.databases {
            if database.name.trim().is_empty() {
                return Err("databases.name cannot be empty".to_string());
            }
            if !seen.insert(database.name.as_str()) {
                return Err(format!("Duplicate database service name '{}'", database.name));
            }
        }
        Ok(())
    }

    /// Looks up a configured database service by name
    pub fn database(&self, name: &str) -> Option<&ServiceDatabase> {
        self.databases.iter().find(|d| d.name == name)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Adapter registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Consult the adapter synthesizer when an engine type is not registered
    #[serde(default)]
    pub llm_fallback: bool,
}

/// A named database service entry (`[[databases]]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDatabase {
    /// Service name used in generated compose files
    pub name: String,

    /// Endpoint configuration
    #[serde(flatten)]
    pub config: DatabaseConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

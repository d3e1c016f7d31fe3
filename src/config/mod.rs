//! Configuration management for unidb.
//!
//! Two kinds of configuration live here:
//!
//! - [`DatabaseConfig`] - the value object describing one database endpoint,
//!   handed to the adapter registry
//! - [`UnidbConfig`] - the `unidb.toml` file used by the CLI, holding logging
//!   and registry settings plus a list of named database services
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [registry]
//! llm_fallback = false
//!
//! [[databases]]
//! name = "vectors"
//! engine_type = "postgresql"
//! database_name = "rag"
//! username = "rag"
//! password = "${UNIDB_VECTORS_PASSWORD}"
//! ```
//!
//! Use `${VAR_NAME}` for environment variable substitution and `UNIDB_*`
//! variables to override individual settings.

pub mod database;
pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, LoggingConfig, RegistryConfig, ServiceDatabase, UnidbConfig};
pub use secret::{secret_string, SecretString, SecretValue};

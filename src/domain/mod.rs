//! Domain types for unidb.
//!
//! The domain layer holds the error hierarchy and the [`Result`] alias shared
//! by the configuration, adapter and export layers.
//!
//! # Error Handling
//!
//! Registry failures are [`RegistryError`]s and convert into [`UnidbError`]
//! with the `?` operator:
//!
//! ```rust
//! use unidb::adapters::AdapterRegistry;
//! use unidb::config::DatabaseConfig;
//! use unidb::domain::Result;
//!
//! fn example() -> Result<String> {
//!     let registry = AdapterRegistry::new();
//!     let adapter = registry.get_adapter("redis", DatabaseConfig::new("redis", "0"))?;
//!     Ok(adapter.connection_string())
//! }
//! ```

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{RegistryError, SynthesisError, UnidbError};
pub use result::Result;

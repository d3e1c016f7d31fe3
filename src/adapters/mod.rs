//! Database adapters and the adapter registry.
//!
//! This module provides:
//!
//! - [`traits`] - the [`DatabaseAdapter`] capability trait and the container
//!   descriptor types it produces
//! - [`engines`] - the built-in adapters (PostgreSQL, MongoDB, MySQL,
//!   ClickHouse, Redis, Elasticsearch)
//! - [`registry`] - [`AdapterRegistry`], which resolves engine-type strings to
//!   adapters
//! - [`fallback`] - the synthesis hook consulted for unknown engine types
//! - [`render`] - credential encoding shared by the engines
//!
//! # Design Pattern
//!
//! Call sites never name a concrete adapter. They hand an engine-type string
//! and a [`DatabaseConfig`](crate::config::DatabaseConfig) to the registry and
//! work with the returned trait object:
//!
//! ```rust
//! use unidb::adapters::AdapterRegistry;
//! use unidb::config::DatabaseConfig;
//!
//! let registry = AdapterRegistry::new();
//! let adapter = registry
//!     .get_adapter("postgresql", DatabaseConfig::new("postgresql", "rag"))
//!     .unwrap();
//!
//! assert_eq!(adapter.config().port, 5432);
//! assert!(adapter.supports_vector_search());
//! let ddl = adapter.vector_index_ddl("docs", "embedding", 768);
//! assert!(ddl.contains("vector(768)"));
//! ```
//!
//! # Custom Adapters
//!
//! New engines are added by implementing [`DatabaseAdapter`] and
//! [`ConfiguredAdapter`] and calling [`AdapterRegistry::register_adapter`], or
//! by registering an [`AdapterFactory`] directly.

pub mod engines;
pub mod fallback;
pub mod registry;
pub mod render;
pub mod traits;

pub use fallback::{AdapterSynthesizer, UnimplementedSynthesizer};
pub use registry::{AdapterFactory, AdapterInfo, AdapterRegistry, FnFactory, TypedFactory};
pub use traits::{
    ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck, VectorSearchKind,
};

//! Database adapter capability traits
//!
//! This module defines the contract every database adapter implements, plus
//! the deployment descriptor types adapters produce. Adapters are pure
//! projections of their configuration: none of these methods perform I/O or
//! fail.

use crate::config::DatabaseConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Health check interval used by the built-in adapters
pub const HEALTH_CHECK_INTERVAL_SECONDS: u32 = 30;
/// Health check timeout used by the built-in adapters
pub const HEALTH_CHECK_TIMEOUT_SECONDS: u32 = 10;
/// Health check retries used by the built-in adapters
pub const HEALTH_CHECK_RETRIES: u32 = 3;
/// Health check start period used by most built-in adapters
pub const HEALTH_CHECK_START_PERIOD_SECONDS: u32 = 10;

/// How an engine provides vector search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorSearchKind {
    /// A native vector column type or vector index in the engine itself
    Native,
    /// A search/index module layered on the engine
    Module,
    /// A vector field type in the document mapping
    FieldMapping,
}

impl fmt::Display for VectorSearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorSearchKind::Native => write!(f, "native"),
            VectorSearchKind::Module => write!(f, "module"),
            VectorSearchKind::FieldMapping => write!(f, "field mapping"),
        }
    }
}

/// Container liveness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Shell command run inside the container
    pub command: String,
    pub interval_seconds: u32,
    pub timeout_seconds: u32,
    pub retries: u32,
    pub start_period_seconds: u32,
}

impl HealthCheck {
    /// Creates a health check with the standard timings
    pub fn standard(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            interval_seconds: HEALTH_CHECK_INTERVAL_SECONDS,
            timeout_seconds: HEALTH_CHECK_TIMEOUT_SECONDS,
            retries: HEALTH_CHECK_RETRIES,
            start_period_seconds: HEALTH_CHECK_START_PERIOD_SECONDS,
        }
    }

    /// Overrides the start period
    pub fn with_start_period(mut self, seconds: u32) -> Self {
        self.start_period_seconds = seconds;
        self
    }
}

/// Deployment descriptor for running an engine in a container
///
/// This is a description, not a live resource. Environment variable names are
/// the literal names the engine's official image expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    /// Container image reference
    pub image: String,

    /// Port published on the host
    pub host_port: u32,

    /// Port the engine listens on inside the container
    pub container_port: u32,

    /// Additional `host:container` port mappings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_ports: Vec<String>,

    /// Container environment, in declaration order
    pub environment: IndexMap<String, String>,

    /// `volume:path` mounts
    pub volumes: Vec<String>,

    /// Command override for the container entrypoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Liveness probe
    pub health_check: HealthCheck,
}

impl ContainerDescriptor {
    /// Creates a descriptor with no environment, volumes or extra ports
    pub fn new(
        image: impl Into<String>,
        host_port: u32,
        container_port: u32,
        health_check: HealthCheck,
    ) -> Self {
        Self {
            image: image.into(),
            host_port,
            container_port,
            extra_ports: Vec::new(),
            environment: IndexMap::new(),
            volumes: Vec::new(),
            command: None,
            health_check,
        }
    }

    /// Adds an environment variable
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Adds a volume mount
    pub fn volume(mut self, mount: impl Into<String>) -> Self {
        self.volumes.push(mount.into());
        self
    }

    /// Adds an extra `host:container` port mapping
    pub fn extra_port(mut self, mapping: impl Into<String>) -> Self {
        self.extra_ports.push(mapping.into());
        self
    }

    /// Sets the command override
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// All `host:container` port mappings, primary first
    pub fn port_mappings(&self) -> Vec<String> {
        let mut ports = vec![format!("{}:{}", self.host_port, self.container_port)];
        ports.extend(self.extra_ports.iter().cloned());
        ports
    }

    /// Named volumes referenced by the mounts (the part before `:`)
    pub fn volume_names(&self) -> Vec<&str> {
        self.volumes
            .iter()
            .filter_map(|mount| mount.split(':').next())
            .filter(|name| !name.is_empty() && !name.starts_with('/') && !name.starts_with('.'))
            .collect()
    }
}

/// Database adapter capability trait
///
/// Every database-specific adapter implements this trait. An adapter owns the
/// configuration it was built from; engine defaults (port, image) have already
/// been applied to it by the time any method here is called.
pub trait DatabaseAdapter: Send + Sync + fmt::Debug {
    /// Downcast to Any for type-specific operations
    fn as_any(&self) -> &dyn Any;

    /// The configuration this adapter renders, after engine defaulting
    fn config(&self) -> &DatabaseConfig;

    /// Name of the implementing type
    fn implementation_name(&self) -> &'static str;

    /// Normalized engine type
    fn engine_type(&self) -> &str {
        self.config().engine_type()
    }

    /// Engine-native connection URI
    fn connection_string(&self) -> String;

    /// Container deployment descriptor
    fn container_descriptor(&self) -> ContainerDescriptor;

    /// Whether the engine can store and search vectors
    fn supports_vector_search(&self) -> bool;

    /// How vector search is provided, if supported
    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        None
    }

    /// Statements that create the storage container and a similarity index
    ///
    /// # Arguments
    ///
    /// * `table` - Table, collection or index name
    /// * `field` - Vector field name
    /// * `dimension` - Vector dimension
    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String;

    /// Liveness probe command, identical to the descriptor's health check
    fn health_check_command(&self) -> String;
}

/// An adapter type the registry can construct directly from a configuration
///
/// Implementing this lets a type be registered with
/// [`AdapterRegistry::register_adapter`](crate::adapters::AdapterRegistry::register_adapter).
pub trait ConfiguredAdapter: DatabaseAdapter + Sized + 'static {
    /// Name reported by the registry
    const IMPLEMENTATION_NAME: &'static str;

    /// One-line description reported by the registry
    const DESCRIPTION: &'static str = "";

    /// Builds the adapter, applying engine defaults to the configuration
    fn from_config(config: DatabaseConfig) -> Self;
}

/// Replaces a zero port and an empty image with the engine defaults
pub fn apply_engine_defaults(config: &mut DatabaseConfig, default_port: u32, default_image: &str) {
    if config.port == 0 {
        config.port = default_port;
    }
    if config.container_image.is_empty() {
        config.container_image = default_image.to_string();
    }
    tracing::debug!(
        engine_type = %config.engine_type(),
        port = config.port,
        image = %config.container_image,
        "Initialized adapter"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_standard() {
        let check = HealthCheck::standard("redis-cli ping");
        assert_eq!(check.command, "redis-cli ping");
        assert_eq!(check.interval_seconds, 30);
        assert_eq!(check.timeout_seconds, 10);
        assert_eq!(check.retries, 3);
        assert_eq!(check.start_period_seconds, 10);
        assert_eq!(check.with_start_period(30).start_period_seconds, 30);
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = ContainerDescriptor::new("img:1", 8123, 8123, HealthCheck::standard("x"))
            .env("B", "2")
            .env("A", "1")
            .volume("data:/var/lib/data")
            .volume("./init:/docker-entrypoint-initdb.d")
            .extra_port("9000:9000")
            .command("serve");

        assert_eq!(descriptor.port_mappings(), vec!["8123:8123", "9000:9000"]);
        let keys: Vec<&String> = descriptor.environment.keys().collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(descriptor.volume_names(), vec!["data"]);
        assert_eq!(descriptor.command.as_deref(), Some("serve"));
    }

    #[test]
    fn test_apply_engine_defaults() {
        let mut config = DatabaseConfig::new("redis", "0");
        apply_engine_defaults(&mut config, 6379, "redis:7.2-alpine");
        assert_eq!(config.port, 6379);
        assert_eq!(config.container_image, "redis:7.2-alpine");

        let mut config = DatabaseConfig::new("redis", "0")
            .with_port(7000)
            .with_image("redis:7.4");
        apply_engine_defaults(&mut config, 6379, "redis:7.2-alpine");
        assert_eq!(config.port, 7000);
        assert_eq!(config.container_image, "redis:7.4");
    }

    #[test]
    fn test_vector_search_kind_display() {
        assert_eq!(VectorSearchKind::Native.to_string(), "native");
        assert_eq!(VectorSearchKind::FieldMapping.to_string(), "field mapping");
    }
}

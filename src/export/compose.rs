//! Compose file generation
//!
//! Turns a set of named adapters into a compose document. Each adapter's
//! [`ContainerDescriptor`] becomes a service; every named volume the services
//! mount is declared at the top level. The document is written as JSON, which
//! compose accepts as YAML.
//!
//! Compose interpolates `$` from the host environment, so every `$` in an
//! environment value, command or health check is written as `$$` and reaches
//! the container unchanged.

use crate::adapters::{ContainerDescriptor, DatabaseAdapter, HealthCheck};
use crate::domain::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Compose file format version
pub const COMPOSE_VERSION: &str = "3.8";

/// A compose document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub version: String,
    pub services: IndexMap<String, ComposeService>,
    pub volumes: IndexMap<String, VolumeSpec>,
}

/// A single compose service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeService {
    pub image: String,
    pub ports: Vec<String>,
    pub environment: IndexMap<String, String>,
    pub volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub healthcheck: ComposeHealthCheck,
}

/// Compose health check block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeHealthCheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
    pub start_period: String,
}

/// Top-level named volume declaration (always empty: default driver)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSpec {}

/// Escapes `value` against compose variable interpolation
fn escape_interpolation(value: &str) -> String {
    value.replace('$', "$$")
}

impl From<&HealthCheck> for ComposeHealthCheck {
    fn from(check: &HealthCheck) -> Self {
        Self {
            test: vec!["CMD-SHELL".to_string(), escape_interpolation(&check.command)],
            interval: format!("{}s", check.interval_seconds),
            timeout: format!("{}s", check.timeout_seconds),
            retries: check.retries,
            start_period: format!("{}s", check.start_period_seconds),
        }
    }
}

impl From<ContainerDescriptor> for ComposeService {
    fn from(descriptor: ContainerDescriptor) -> Self {
        Self {
            ports: descriptor.port_mappings(),
            healthcheck: ComposeHealthCheck::from(&descriptor.health_check),
            image: descriptor.image,
            environment: descriptor
                .environment
                .into_iter()
                .map(|(key, value)| (key, escape_interpolation(&value)))
                .collect(),
            volumes: descriptor.volumes,
            command: descriptor.command.as_deref().map(escape_interpolation),
        }
    }
}

/// Builds a compose document from `(service name, adapter)` pairs
///
/// Services keep the order they are given in. Two services publishing the
/// same host port are allowed but logged, since compose will refuse to start
/// the second one.
pub fn build_compose<'a, I>(services: I) -> ComposeFile
where
    I: IntoIterator<Item = (&'a str, &'a dyn DatabaseAdapter)>,
{
    let mut compose = ComposeFile {
        version: COMPOSE_VERSION.to_string(),
        services: IndexMap::new(),
        volumes: IndexMap::new(),
    };
    let mut host_ports: HashMap<String, String> = HashMap::new();

    for (name, adapter) in services {
        let descriptor = adapter.container_descriptor();

        for volume in descriptor.volume_names() {
            compose
                .volumes
                .entry(volume.to_string())
                .or_insert_with(VolumeSpec::default);
        }

        let service = ComposeService::from(descriptor);
        for mapping in &service.ports {
            let host_port = mapping.split(':').next().unwrap_or(mapping).to_string();
            if let Some(other) = host_ports.insert(host_port.clone(), name.to_string()) {
                tracing::warn!(
                    service = name,
                    other_service = %other,
                    host_port = %host_port,
                    "Host port published by more than one service"
                );
            }
        }

        tracing::debug!(
            service = name,
            engine_type = %adapter.engine_type(),
            image = %service.image,
            "Added compose service"
        );
        compose.services.insert(name.to_string(), service);
    }

    compose
}

impl ComposeFile {
    /// Renders the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        tracing::info!(
            path = %path.display(),
            services = self.services.len(),
            "Wrote compose file"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::AdapterRegistry;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_health_check_conversion() {
        let check = HealthCheck::standard("pg_isready -U u -d db").with_start_period(30);
        let compose = ComposeHealthCheck::from(&check);
        assert_eq!(compose.test, vec!["CMD-SHELL", "pg_isready -U u -d db"]);
        assert_eq!(compose.interval, "30s");
        assert_eq!(compose.timeout, "10s");
        assert_eq!(compose.retries, 3);
        assert_eq!(compose.start_period, "30s");
    }

    #[test]
    fn test_build_compose() {
        let registry = AdapterRegistry::new();
        let postgres = registry
            .get_adapter("postgresql", DatabaseConfig::new("postgresql", "app"))
            .unwrap();
        let redis = registry
            .get_adapter("redis", DatabaseConfig::new("redis", "0"))
            .unwrap();

        let compose = build_compose([("db", &*postgres), ("cache", &*redis)]);

        assert_eq!(compose.version, "3.8");
        let names: Vec<&String> = compose.services.keys().collect();
        assert_eq!(names, vec!["db", "cache"]);
        assert_eq!(compose.services["db"].ports, vec!["5432:5432"]);
        assert_eq!(
            compose.services["cache"].command.as_deref(),
            Some("redis-server --requirepass password")
        );
        let volumes: Vec<&String> = compose.volumes.keys().collect();
        assert_eq!(volumes, vec!["postgres_data", "redis_data"]);
    }

    #[test]
    fn test_dollar_signs_are_escaped() {
        let registry = AdapterRegistry::new();
        let search = registry
            .get_adapter(
                "elasticsearch",
                DatabaseConfig::new("elasticsearch", "search").with_credentials("elastic", "pa$$word"),
            )
            .unwrap();
        let redis = registry
            .get_adapter(
                "redis",
                DatabaseConfig::new("redis", "0").with_credentials("default", "c$sh"),
            )
            .unwrap();
        let compose = build_compose([("search", &*search), ("cache", &*redis)]);

        let search = &compose.services["search"];
        assert_eq!(search.environment["ELASTIC_PASSWORD"], "pa$$$$word");
        assert_eq!(
            search.healthcheck.test[1],
            "curl -fs -u elastic:$$ELASTIC_PASSWORD http://localhost:9200/_cluster/health"
        );
        assert_eq!(
            compose.services["cache"].command.as_deref(),
            Some("redis-server --requirepass 'c$$sh'")
        );
    }

    #[test]
    fn test_to_json_declares_empty_volumes() {
        let registry = AdapterRegistry::new();
        let mongo = registry
            .get_adapter("mongodb", DatabaseConfig::new("mongodb", "docs"))
            .unwrap();
        let json = build_compose([("docs", &*mongo)]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["volumes"]["mongodb_data"], serde_json::json!({}));
        assert!(value["services"]["docs"].get("command").is_none());
    }
}

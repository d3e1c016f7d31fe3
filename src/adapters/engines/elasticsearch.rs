//! Elasticsearch adapter with dense vector search

use crate::adapters::render::encode_userinfo;
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use serde_json::json;
use std::any::Any;

/// Canonical Elasticsearch HTTP port
pub const DEFAULT_PORT: u32 = 9200;
/// Official Elasticsearch 8.0.0 image
pub const DEFAULT_IMAGE: &str = "docker.elastic.co/elasticsearch/elasticsearch:8.0.0";

/// Built-in user whose password the image sets from `ELASTIC_PASSWORD`
const SUPERUSER: &str = "elastic";

/// Elasticsearch needs longer to form a cluster than the other engines
const START_PERIOD_SECONDS: u32 = 30;

/// Elasticsearch adapter
///
/// The "vector index DDL" is a REST request: `PUT /<index>` followed by the
/// JSON mapping body with a `dense_vector` field.
///
/// Security is enabled in the container, so the health check authenticates as
/// `elastic`, reading the password from the container's own environment.
#[derive(Debug)]
pub struct ElasticsearchAdapter {
    config: DatabaseConfig,
}

impl ConfiguredAdapter for ElasticsearchAdapter {
    const IMPLEMENTATION_NAME: &'static str = "ElasticsearchAdapter";
    const DESCRIPTION: &'static str = "Elasticsearch full-text search with dense_vector mappings";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for ElasticsearchAdapter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn implementation_name(&self) -> &'static str {
        Self::IMPLEMENTATION_NAME
    }

    fn connection_string(&self) -> String {
        let username = encode_userinfo(&self.config.username);
        let password = encode_userinfo(&self.config.password.expose_secret().to_string());
        let protocol = if self.config.tls_enabled {
            "https"
        } else {
            "http"
        };
        format!(
            "{}://{}:{}@{}:{}",
            protocol,
            username,
            password,
            self.config.host,
            self.config.port
        )
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        ContainerDescriptor::new(
            &self.config.container_image,
            self.config.port,
            DEFAULT_PORT,
            HealthCheck::standard(self.health_check_command())
                .with_start_period(START_PERIOD_SECONDS),
        )
        .env("discovery.type", "single-node")
        .env(
            "ELASTIC_PASSWORD",
            self.config.password.expose_secret().to_string(),
        )
        .env("xpack.security.enabled", "true")
        .volume("elasticsearch_data:/usr/share/elasticsearch/data")
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::FieldMapping)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        let mut properties = serde_json::Map::new();
        properties.insert("content".to_string(), json!({ "type": "text" }));
        properties.insert(
            field.to_string(),
            json!({
                "type": "dense_vector",
                "dims": dimension,
                "index": true,
                "similarity": "cosine"
            }),
        );
        let body = json!({ "mappings": { "properties": properties } });
        let body = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
        format!("PUT /{table}\n{body}\n")
    }

    fn health_check_command(&self) -> String {
        format!(
            "curl -fs -u {SUPERUSER}:$ELASTIC_PASSWORD http://localhost:{DEFAULT_PORT}/_cluster/health"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string_protocol() {
        let config = DatabaseConfig::new("elasticsearch", "search").with_credentials("elastic", "pw");
        assert_eq!(
            ElasticsearchAdapter::from_config(config.clone()).connection_string(),
            "http://elastic:pw@localhost:9200"
        );
        assert_eq!(
            ElasticsearchAdapter::from_config(config.with_tls(true)).connection_string(),
            "https://elastic:pw@localhost:9200"
        );
    }

    #[test]
    fn test_container_descriptor() {
        let adapter = ElasticsearchAdapter::from_config(
            DatabaseConfig::new("elasticsearch", "search").with_credentials("elastic", "pw"),
        );
        let descriptor = adapter.container_descriptor();
        assert_eq!(descriptor.environment["discovery.type"], "single-node");
        assert_eq!(descriptor.environment["ELASTIC_PASSWORD"], "pw");
        assert_eq!(descriptor.environment["xpack.security.enabled"], "true");
        assert_eq!(descriptor.health_check.start_period_seconds, 30);
    }

    #[test]
    fn test_health_check_authenticates() {
        let adapter = ElasticsearchAdapter::from_config(
            DatabaseConfig::new("elasticsearch", "search").with_credentials("elastic", "pw"),
        );
        let command = adapter.health_check_command();
        assert_eq!(
            command,
            "curl -fs -u elastic:$ELASTIC_PASSWORD http://localhost:9200/_cluster/health"
        );
        assert!(!command.contains("pw"));
        assert_eq!(adapter.container_descriptor().health_check.command, command);
    }

    #[test]
    fn test_mapping_body_is_valid_json() {
        let adapter = ElasticsearchAdapter::from_config(DatabaseConfig::new("elasticsearch", "search"));
        let ddl = adapter.vector_index_ddl("docs", "embedding", 768);
        let (request_line, body) = ddl.split_once('\n').unwrap();
        assert_eq!(request_line, "PUT /docs");

        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        let field = &body["mappings"]["properties"]["embedding"];
        assert_eq!(field["type"], "dense_vector");
        assert_eq!(field["dims"], 768);
        assert_eq!(field["similarity"], "cosine");
        assert_eq!(body["mappings"]["properties"]["content"]["type"], "text");
    }
}

//! ClickHouse adapter for analytics workloads

use crate::adapters::render::encode_userinfo;
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use std::any::Any;

/// Canonical ClickHouse HTTP port
pub const DEFAULT_PORT: u32 = 8123;
/// Official ClickHouse server image
pub const DEFAULT_IMAGE: &str = "clickhouse/clickhouse-server:latest";
/// Native protocol port, always published alongside HTTP
pub const NATIVE_PORT: u32 = 9000;

/// ClickHouse adapter
///
/// Embeddings live in an `Array(Float32)` column with an HNSW
/// `vector_similarity` skip index over cosine distance.
#[derive(Debug)]
pub struct ClickHouseAdapter {
    config: DatabaseConfig,
}

impl ConfiguredAdapter for ClickHouseAdapter {
    const IMPLEMENTATION_NAME: &'static str = "ClickHouseAdapter";
    const DESCRIPTION: &'static str = "ClickHouse columnar analytics with vector similarity indexes";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for ClickHouseAdapter {
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
        let mut uri = format!(
            "clickhouse://{}:{}@{}:{}/{}",
            username,
            password,
            self.config.host,
            self.config.port,
            self.config.database_name
        );
        if self.config.tls_enabled {
            uri.push_str("?secure=true");
        }
        uri
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        ContainerDescriptor::new(
            &self.config.container_image,
            self.config.port,
            DEFAULT_PORT,
            HealthCheck::standard(self.health_check_command()),
        )
        .extra_port(format!("{NATIVE_PORT}:{NATIVE_PORT}"))
        .env("CLICKHOUSE_DB", &self.config.database_name)
        .env("CLICKHOUSE_USER", &self.config.username)
        .env(
            "CLICKHOUSE_PASSWORD",
            self.config.password.expose_secret().to_string(),
        )
        .volume("clickhouse_data:/var/lib/clickhouse")
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::Native)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        format!(
            "SET allow_experimental_vector_similarity_index = 1;\n\
             CREATE TABLE IF NOT EXISTS {table} (\n    \
                 id UInt64,\n    \
                 content String,\n    \
                 {field} Array(Float32),\n    \
                 created_at DateTime DEFAULT now(),\n    \
                 CONSTRAINT {table}_{field}_dim CHECK length({field}) = {dimension},\n    \
                 INDEX {table}_{field}_idx {field} TYPE vector_similarity('hnsw', 'cosineDistance', {dimension})\n\
             ) ENGINE = MergeTree() ORDER BY id;\n"
        )
    }

    fn health_check_command(&self) -> String {
        format!("curl -f http://localhost:{DEFAULT_PORT}/ping")
    }
}

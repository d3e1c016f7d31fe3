//! PostgreSQL adapter with pgvector support

use crate::adapters::render::encode_userinfo;
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use std::any::Any;

/// Canonical PostgreSQL port
pub const DEFAULT_PORT: u32 = 5432;
/// pgvector-enabled PostgreSQL 16 image
pub const DEFAULT_IMAGE: &str = "pgvector/pgvector:pg16";

/// Number of IVFFlat lists created by the vector index
const IVFFLAT_LISTS: u32 = 100;

/// PostgreSQL adapter
///
/// Vectors are stored in a pgvector `vector(n)` column and indexed with
/// IVFFlat over cosine distance.
#[derive(Debug)]
pub struct PostgreSqlAdapter {
    config: DatabaseConfig,
}

impl ConfiguredAdapter for PostgreSqlAdapter {
    const IMPLEMENTATION_NAME: &'static str = "PostgreSqlAdapter";
    const DESCRIPTION: &'static str = "PostgreSQL with the pgvector extension";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for PostgreSqlAdapter {
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
        let ssl_mode = if self.config.tls_enabled {
            "require"
        } else {
            "disable"
        };
        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode={}",
            username,
            password,
            self.config.host,
            self.config.port,
            self.config.database_name,
            ssl_mode
        )
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        ContainerDescriptor::new(
            &self.config.container_image,
            self.config.port,
            DEFAULT_PORT,
            HealthCheck::standard(self.health_check_command()),
        )
        .env("POSTGRES_DB", &self.config.database_name)
        .env("POSTGRES_USER", &self.config.username)
        .env("POSTGRES_PASSWORD", self.config.password.expose_secret().to_string())
        .volume("postgres_data:/var/lib/postgresql/data")
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::Native)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        format!(
            "CREATE EXTENSION IF NOT EXISTS vector;\n\
             CREATE TABLE IF NOT EXISTS {table} (\n    \
                 id SERIAL PRIMARY KEY,\n    \
                 content TEXT NOT NULL,\n    \
                 {field} vector({dimension}) NOT NULL,\n    \
                 created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n\
             );\n\
             CREATE INDEX IF NOT EXISTS {table}_{field}_idx ON {table} \
             USING ivfflat ({field} vector_cosine_ops) WITH (lists = {IVFFLAT_LISTS});\n"
        )
    }

    fn health_check_command(&self) -> String {
        format!(
            "pg_isready -U {} -d {}",
            self.config.username, self.config.database_name
        )
    }
}

//! MySQL adapter
//!
//! MySQL 8.0 has no vector type, so embeddings are stored as a JSON array whose
//! length is pinned to the dimension by a check constraint. Similarity is
//! computed client-side or by the query layer; there is no index to create.

use crate::adapters::render::encode_userinfo;
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use std::any::Any;

/// Canonical MySQL port
pub const DEFAULT_PORT: u32 = 3306;
/// Official MySQL 8.0 image
pub const DEFAULT_IMAGE: &str = "mysql:8.0";

/// MySQL adapter
#[derive(Debug)]
pub struct MySqlAdapter {
    config: DatabaseConfig,
}

impl ConfiguredAdapter for MySqlAdapter {
    const IMPLEMENTATION_NAME: &'static str = "MySqlAdapter";
    const DESCRIPTION: &'static str = "MySQL 8.0 with JSON-encoded embeddings";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for MySqlAdapter {
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
        format!(
            "mysql://{}:{}@{}:{}/{}?useSSL={}",
            username,
            password,
            self.config.host,
            self.config.port,
            self.config.database_name,
            self.config.tls_enabled
        )
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        let password = self.config.password.expose_secret().to_string();
        ContainerDescriptor::new(
            &self.config.container_image,
            self.config.port,
            DEFAULT_PORT,
            HealthCheck::standard(self.health_check_command()),
        )
        .env("MYSQL_DATABASE", &self.config.database_name)
        .env("MYSQL_USER", &self.config.username)
        .env("MYSQL_PASSWORD", password.clone())
        .env("MYSQL_ROOT_PASSWORD", password)
        .volume("mysql_data:/var/lib/mysql")
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::FieldMapping)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (\n    \
                 id INT AUTO_INCREMENT PRIMARY KEY,\n    \
                 content LONGTEXT NOT NULL,\n    \
                 {field} JSON NOT NULL,\n    \
                 created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n    \
                 CONSTRAINT {table}_{field}_dim CHECK (JSON_LENGTH({field}) = {dimension})\n\
             );\n"
        )
    }

    fn health_check_command(&self) -> String {
        format!("mysqladmin ping -u {}", self.config.username)
    }
}

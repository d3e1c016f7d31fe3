//! MongoDB adapter with vector search index support

use crate::adapters::render::encode_userinfo;
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use serde_json::json;
use std::any::Any;

/// Canonical MongoDB port
pub const DEFAULT_PORT: u32 = 27017;
/// Official MongoDB 7.0 image
pub const DEFAULT_IMAGE: &str = "mongo:7.0";

/// MongoDB adapter
///
/// The vector index is a `vectorSearch` search index created from mongosh.
#[derive(Debug)]
pub struct MongoDbAdapter {
    config: DatabaseConfig,
}

impl ConfiguredAdapter for MongoDbAdapter {
    const IMPLEMENTATION_NAME: &'static str = "MongoDbAdapter";
    const DESCRIPTION: &'static str = "MongoDB document store with vector search indexes";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for MongoDbAdapter {
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
            "mongodb://{}:{}@{}:{}/{}",
            username,
            password,
            self.config.host,
            self.config.port,
            self.config.database_name
        );
        if self.config.tls_enabled {
            uri.push_str("?tls=true");
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
        .env("MONGO_INITDB_DATABASE", &self.config.database_name)
        .env("MONGO_INITDB_ROOT_USERNAME", &self.config.username)
        .env(
            "MONGO_INITDB_ROOT_PASSWORD",
            self.config.password.expose_secret().to_string(),
        )
        .volume("mongodb_data:/data/db")
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::Module)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        let definition = json!({
            "fields": [
                {
                    "type": "vector",
                    "path": field,
                    "numDimensions": dimension,
                    "similarity": "cosine"
                }
            ]
        });
        format!(
            "db.createCollection(\"{table}\");\n\
             db.{table}.createSearchIndex(\"{table}_{field}_index\", \"vectorSearch\", {definition});\n"
        )
    }

    fn health_check_command(&self) -> String {
        "mongosh --eval 'db.adminCommand(\"ping\")'".to_string()
    }
}

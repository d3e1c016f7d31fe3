//! Redis adapter with RediSearch vector support

use crate::adapters::render::{encode_userinfo, shell_quote};
use crate::adapters::traits::{
    apply_engine_defaults, ConfiguredAdapter, ContainerDescriptor, DatabaseAdapter, HealthCheck,
    VectorSearchKind,
};
use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use std::any::Any;

/// Canonical Redis port
pub const DEFAULT_PORT: u32 = 6379;
/// Official Redis 7.2 alpine image
pub const DEFAULT_IMAGE: &str = "redis:7.2-alpine";

/// Redis adapter
///
/// Redis has no users in the default image; the password is enforced with
/// `--requirepass` and the database name is the numeric database index.
#[derive(Debug)]
pub struct RedisAdapter {
    config: DatabaseConfig,
}

impl RedisAdapter {
    /// Numeric database index; anything that is not a number selects 0
    fn database_index(&self) -> u32 {
        self.config.database_name.trim().parse().unwrap_or(0)
    }
}

impl ConfiguredAdapter for RedisAdapter {
    const IMPLEMENTATION_NAME: &'static str = "RedisAdapter";
    const DESCRIPTION: &'static str = "Redis key-value cache with RediSearch vector indexes";

    fn from_config(mut config: DatabaseConfig) -> Self {
        apply_engine_defaults(&mut config, DEFAULT_PORT, DEFAULT_IMAGE);
        Self { config }
    }
}

impl DatabaseAdapter for RedisAdapter {
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
        let password = encode_userinfo(&self.config.password.expose_secret().to_string());
        let scheme = if self.config.tls_enabled {
            "rediss"
        } else {
            "redis"
        };
        format!(
            "{}://:{}@{}:{}/{}",
            scheme,
            password,
            self.config.host,
            self.config.port,
            self.database_index()
        )
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        ContainerDescriptor::new(
            &self.config.container_image,
            self.config.port,
            DEFAULT_PORT,
            HealthCheck::standard(self.health_check_command()),
        )
        .volume("redis_data:/data")
        .command(format!(
            "redis-server --requirepass {}",
            shell_quote(&self.config.password.expose_secret().to_string())
        ))
    }

    fn supports_vector_search(&self) -> bool {
        true
    }

    fn vector_search_kind(&self) -> Option<VectorSearchKind> {
        Some(VectorSearchKind::Module)
    }

    fn vector_index_ddl(&self, table: &str, field: &str, dimension: usize) -> String {
        format!(
            "FT.CREATE {table} ON HASH PREFIX 1 {table}: SCHEMA content TEXT \
             {field} VECTOR FLAT 6 TYPE FLOAT32 DIM {dimension} DISTANCE_METRIC COSINE\n"
        )
    }

    fn health_check_command(&self) -> String {
        "redis-cli ping".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string_uses_database_index() {
        let config = DatabaseConfig::new("redis", "3").with_credentials("default", "pw");
        assert_eq!(
            RedisAdapter::from_config(config).connection_string(),
            "redis://:pw@localhost:6379/3"
        );

        let config = DatabaseConfig::new("redis", "cache").with_credentials("default", "pw");
        assert_eq!(
            RedisAdapter::from_config(config).connection_string(),
            "redis://:pw@localhost:6379/0"
        );
    }

    #[test]
    fn test_tls_switches_scheme() {
        let config = DatabaseConfig::new("redis", "0")
            .with_credentials("default", "pw")
            .with_tls(true);
        assert!(RedisAdapter::from_config(config)
            .connection_string()
            .starts_with("rediss://"));
    }

    #[test]
    fn test_container_descriptor() {
        let adapter = RedisAdapter::from_config(
            DatabaseConfig::new("redis", "0").with_credentials("default", "pw"),
        );
        let descriptor = adapter.container_descriptor();
        assert!(descriptor.environment.is_empty());
        assert_eq!(descriptor.command.as_deref(), Some("redis-server --requirepass pw"));
        assert_eq!(descriptor.health_check.command, "redis-cli ping");
    }

    #[test]
    fn test_requirepass_is_one_shell_word() {
        let adapter = RedisAdapter::from_config(
            DatabaseConfig::new("redis", "0").with_credentials("default", "open sesame"),
        );
        assert_eq!(
            adapter.container_descriptor().command.as_deref(),
            Some("redis-server --requirepass 'open sesame'")
        );
        assert_eq!(
            adapter.connection_string(),
            "redis://:open%20sesame@localhost:6379/0"
        );
    }

    #[test]
    fn test_vector_index_ddl() {
        let adapter = RedisAdapter::from_config(DatabaseConfig::new("redis", "0"));
        assert_eq!(
            adapter.vector_index_ddl("docs", "embedding", 768),
            "FT.CREATE docs ON HASH PREFIX 1 docs: SCHEMA content TEXT embedding VECTOR FLAT 6 TYPE FLOAT32 DIM 768 DISTANCE_METRIC COSINE\n"
        );
    }
}

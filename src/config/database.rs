//! Database endpoint configuration
//!
//! [`DatabaseConfig`] describes one database endpoint that an adapter will
//! render connection strings and container descriptors for. The engine type is
//! lowercased once when the value is built or deserialized; every other field
//! is kept as given. `validate()` is advisory and never fails.

use crate::config::secret::{secret_string, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// Highest valid TCP port
pub const MAX_PORT: u32 = 65_535;

/// Valid connection pool size range
pub const POOL_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Valid query timeout range, in seconds
pub const QUERY_TIMEOUT_RANGE: std::ops::RangeInclusive<u32> = 1..=300;

/// Configuration for a single database endpoint
///
/// # Examples
///
/// ```
/// use unidb::config::DatabaseConfig;
///
/// let config = DatabaseConfig::new("PostgreSQL", "app")
///     .with_credentials("app_user", "app_pass")
///     .with_image("pgvector/pgvector:pg16");
///
/// assert_eq!(config.engine_type(), "postgresql");
/// let (ok, errors) = config.validate();
/// assert!(ok, "{errors:?}");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Engine type, always lowercase
    #[serde(deserialize_with = "deserialize_engine_type")]
    engine_type: String,

    /// Database name (for Redis, the numeric database index)
    pub database_name: String,

    /// Database host
    #[serde(default = "default_host")]
    pub host: String,

    /// Port; 0 means "use the engine default"
    #[serde(default)]
    pub port: u32,

    /// Connection username
    #[serde(default = "default_username")]
    pub username: String,

    /// Connection password
    #[serde(default = "default_password")]
    pub password: SecretString,

    /// Whether clients should connect over TLS
    #[serde(default)]
    pub tls_enabled: bool,

    /// Connection pool size for downstream consumers
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: u32,

    /// Container image; empty means "use the engine default"
    #[serde(default)]
    pub container_image: String,

    /// Query timeout for downstream consumers, in seconds
    #[serde(default = "default_query_timeout_seconds")]
    pub query_timeout_seconds: u32,
}

impl DatabaseConfig {
    /// Creates a configuration with the default host, credentials and limits
    pub fn new(engine_type: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            engine_type: engine_type.into().to_lowercase(),
            database_name: database_name.into(),
            host: default_host(),
            port: 0,
            username: default_username(),
            password: default_password(),
            tls_enabled: false,
            connection_pool_size: default_pool_size(),
            container_image: String::new(),
            query_timeout_seconds: default_query_timeout_seconds(),
        }
    }

    /// Returns the normalized (lowercase) engine type
    pub fn engine_type(&self) -> &str {
        &self.engine_type
    }

    /// Sets the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port (0 selects the engine default)
    pub fn with_port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    /// Sets username and password
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = secret_string(password);
        self
    }

    /// Enables or disables TLS
    pub fn with_tls(mut self, enabled: bool) -> Self {
        self.tls_enabled = enabled;
        self
    }

    /// Sets the connection pool size
    pub fn with_pool_size(mut self, size: u32) -> Self {
        self.connection_pool_size = size;
        self
    }

    /// Sets the container image (empty selects the engine default)
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.container_image = image.into();
        self
    }

    /// Sets the query timeout
    pub fn with_query_timeout(mut self, seconds: u32) -> Self {
        self.query_timeout_seconds = seconds;
        self
    }

    /// Validates the configuration
    ///
    /// Returns `(is_valid, errors)` with every violated rule, in a fixed order
    /// so that callers can display the complete list. Calling this has no
    /// side effects.
    pub fn validate(&self) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        if self.port > MAX_PORT {
            errors.push(format!(
                "Invalid port: {} (must be between 0 and {MAX_PORT})",
                self.port
            ));
        }

        if !POOL_SIZE_RANGE.contains(&self.connection_pool_size) {
            errors.push(format!(
                "Invalid pool size: {} (must be between {} and {})",
                self.connection_pool_size,
                POOL_SIZE_RANGE.start(),
                POOL_SIZE_RANGE.end()
            ));
        }

        if !QUERY_TIMEOUT_RANGE.contains(&self.query_timeout_seconds) {
            errors.push(format!(
                "Invalid timeout: {}s (must be between {} and {})",
                self.query_timeout_seconds,
                QUERY_TIMEOUT_RANGE.start(),
                QUERY_TIMEOUT_RANGE.end()
            ));
        }

        let required = [
            ("engine_type", &self.engine_type),
            ("database_name", &self.database_name),
            ("host", &self.host),
            ("username", &self.username),
        ];
        for (field, value) in required {
            if value.is_empty() {
                errors.push(format!("{field} is required"));
            }
        }

        if self.container_image.is_empty() {
            errors.push("container image must be specified for container deployment".to_string());
        }

        (errors.is_empty(), errors)
    }
}

fn deserialize_engine_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_lowercase())
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> SecretString {
    secret_string("password")
}

fn default_pool_size() -> u32 {
    10
}

fn default_query_timeout_seconds() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn valid_config() -> DatabaseConfig {
        DatabaseConfig::new("postgresql", "test_db")
            .with_port(5432)
            .with_credentials("postgres", "postgres")
            .with_image("pgvector/pgvector:pg16")
    }

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::new("mysql", "app");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 0);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password.expose_secret(), "password");
        assert!(!config.tls_enabled);
        assert_eq!(config.connection_pool_size, 10);
        assert!(config.container_image.is_empty());
        assert_eq!(config.query_timeout_seconds, 30);
    }

    #[test]
    fn test_engine_type_lowercased() {
        assert_eq!(DatabaseConfig::new("PostgreSQL", "x").engine_type(), "postgresql");
        assert_eq!(DatabaseConfig::new("postgresql", "x").engine_type(), "postgresql");
        assert_eq!(DatabaseConfig::new("MONGODB", "x").engine_type(), "mongodb");
    }

    #[test]
    fn test_valid_config() {
        let (ok, errors) = valid_config().validate();
        assert!(ok);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_port_zero_is_valid() {
        let (ok, _) = valid_config().with_port(0).validate();
        assert!(ok);
    }

    #[test]
    fn test_port_boundaries() {
        assert!(valid_config().with_port(65_535).validate().0);
        let (ok, errors) = valid_config().with_port(65_536).validate();
        assert!(!ok);
        assert!(errors[0].contains("port"));
    }

    #[test]
    fn test_invalid_port() {
        let (ok, errors) = valid_config().with_port(70_000).validate();
        assert!(!ok);
        assert!(errors.iter().any(|e| e.to_lowercase().contains("port")));
    }

    #[test]
    fn test_invalid_pool_size() {
        let (ok, errors) = valid_config().with_pool_size(2000).validate();
        assert!(!ok);
        assert!(errors.iter().any(|e| e.to_lowercase().contains("pool")));

        let (ok, _) = valid_config().with_pool_size(0).validate();
        assert!(!ok);
    }

    #[test]
    fn test_invalid_timeout() {
        let (ok, errors) = valid_config().with_query_timeout(500).validate();
        assert!(!ok);
        assert!(errors.iter().any(|e| e.to_lowercase().contains("timeout")));

        let (ok, _) = valid_config().with_query_timeout(0).validate();
        assert!(!ok);
    }

    #[test]
    fn test_missing_image() {
        let (ok, errors) = valid_config().with_image("").validate();
        assert!(!ok);
        assert!(errors.iter().any(|e| e.to_lowercase().contains("image")));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut config = valid_config().with_host("");
        config.username = String::new();
        config.database_name = String::new();
        let (ok, errors) = config.validate();
        assert!(!ok);
        assert_eq!(
            errors,
            vec![
                "database_name is required".to_string(),
                "host is required".to_string(),
                "username is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_reports_all_errors_in_order() {
        let config = DatabaseConfig::new("", "db")
            .with_port(70_000)
            .with_pool_size(2000)
            .with_query_timeout(500);
        let (ok, errors) = config.validate();
        assert!(!ok);
        assert_eq!(errors.len(), 5);
        assert!(errors[0].contains("port"));
        assert!(errors[1].contains("pool"));
        assert!(errors[2].contains("timeout"));
        assert_eq!(errors[3], "engine_type is required");
        assert!(errors[4].contains("image"));
    }

    #[test]
    fn test_validate_is_repeatable() {
        let config = valid_config().with_port(70_000);
        assert_eq!(config.validate(), config.validate());
        assert_eq!(config.port, 70_000);
    }

    #[test]
    fn test_deserialize_normalizes_engine_type() {
        let config: DatabaseConfig = toml::from_str(
            r#"
engine_type = "ClickHouse"
database_name = "analytics"
"#,
        )
        .unwrap();
        assert_eq!(config.engine_type(), "clickhouse");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.connection_pool_size, 10);
    }
}

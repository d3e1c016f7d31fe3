//! Adapter registry
//!
//! The registry maps lowercase engine-type strings to adapter factories and
//! builds a fresh adapter for every lookup. It is created pre-populated with
//! the built-in engines and can be extended or overridden at runtime.

use crate::adapters::engines::{
    ClickHouseAdapter, ElasticsearchAdapter, MongoDbAdapter, MySqlAdapter, PostgreSqlAdapter,
    RedisAdapter,
};
use crate::adapters::fallback::{AdapterSynthesizer, UnimplementedSynthesizer};
use crate::adapters::traits::{ConfiguredAdapter, DatabaseAdapter};
use crate::config::{DatabaseConfig, RegistryConfig};
use crate::domain::RegistryError;
use indexmap::IndexMap;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

/// Constructs adapters for one engine type
pub trait AdapterFactory: Send + Sync {
    /// Name of the adapter type this factory builds
    fn implementation_name(&self) -> &str;

    /// One-line description of the adapter
    fn description(&self) -> &str {
        ""
    }

    /// Builds an adapter, applying engine defaults to the configuration
    fn create(&self, config: DatabaseConfig) -> Box<dyn DatabaseAdapter>;
}

/// Factory for any [`ConfiguredAdapter`] type
pub struct TypedFactory<A>(PhantomData<fn() -> A>);

impl<A: ConfiguredAdapter> TypedFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<A: ConfiguredAdapter> Default for TypedFactory<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ConfiguredAdapter> AdapterFactory for TypedFactory<A> {
    fn implementation_name(&self) -> &str {
        A::IMPLEMENTATION_NAME
    }

    fn description(&self) -> &str {
        A::DESCRIPTION
    }

    fn create(&self, config: DatabaseConfig) -> Box<dyn DatabaseAdapter> {
        Box::new(A::from_config(config))
    }
}

type ConstructorFn = dyn Fn(DatabaseConfig) -> Box<dyn DatabaseAdapter> + Send + Sync;

/// Factory backed by a closure
pub struct FnFactory {
    implementation_name: String,
    description: String,
    constructor: Box<ConstructorFn>,
}

impl FnFactory {
    /// Creates a factory from a name and a constructor closure
    pub fn new<F>(implementation_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(DatabaseConfig) -> Box<dyn DatabaseAdapter> + Send + Sync + 'static,
    {
        Self {
            implementation_name: implementation_name.into(),
            description: String::new(),
            constructor: Box::new(constructor),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl AdapterFactory for FnFactory {
    fn implementation_name(&self) -> &str {
        &self.implementation_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn create(&self, config: DatabaseConfig) -> Box<dyn DatabaseAdapter> {
        (self.constructor)(config)
    }
}

/// Metadata about a registered adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterInfo {
    pub engine_type: String,
    pub implementation_name: String,
    pub description: String,
}

/// Registry of database adapters
///
/// # Examples
///
/// ```
/// use unidb::adapters::AdapterRegistry;
/// use unidb::config::DatabaseConfig;
///
/// let registry = AdapterRegistry::new();
/// let config = DatabaseConfig::new("redis", "0").with_credentials("default", "pw");
/// let adapter = registry.get_adapter("Redis", config).unwrap();
///
/// assert_eq!(adapter.connection_string(), "redis://:pw@localhost:6379/0");
/// assert_eq!(adapter.health_check_command(), "redis-cli ping");
/// ```
pub struct AdapterRegistry {
    factories: RwLock<IndexMap<String, Arc<dyn AdapterFactory>>>,
    fallback: Option<Arc<dyn AdapterSynthesizer>>,
}

impl AdapterRegistry {
    /// Creates a registry with the built-in engines and no fallback
    pub fn new() -> Self {
        let mut factories: IndexMap<String, Arc<dyn AdapterFactory>> = IndexMap::new();
        factories.insert(
            "postgresql".to_string(),
            Arc::new(TypedFactory::<PostgreSqlAdapter>::new()),
        );
        factories.insert(
            "mongodb".to_string(),
            Arc::new(TypedFactory::<MongoDbAdapter>::new()),
        );
        factories.insert(
            "mysql".to_string(),
            Arc::new(TypedFactory::<MySqlAdapter>::new()),
        );
        factories.insert(
            "clickhouse".to_string(),
            Arc::new(TypedFactory::<ClickHouseAdapter>::new()),
        );
        factories.insert(
            "redis".to_string(),
            Arc::new(TypedFactory::<RedisAdapter>::new()),
        );
        factories.insert(
            "elasticsearch".to_string(),
            Arc::new(TypedFactory::<ElasticsearchAdapter>::new()),
        );

        tracing::info!(adapters = factories.len(), "Initialized adapter registry");

        Self {
            factories: RwLock::new(factories),
            fallback: None,
        }
    }

    /// Creates a registry that consults `synthesizer` for unknown engine types
    pub fn with_fallback(synthesizer: Arc<dyn AdapterSynthesizer>) -> Self {
        Self {
            fallback: Some(synthesizer),
            ..Self::new()
        }
    }

    /// Creates a registry from the `[registry]` configuration section
    pub fn from_config(config: &RegistryConfig) -> Self {
        if config.llm_fallback {
            Self::with_fallback(Arc::new(UnimplementedSynthesizer))
        } else {
            Self::new()
        }
    }

    /// Whether unknown engine types are handed to a synthesizer
    pub fn fallback_enabled(&self) -> bool {
        self.fallback.is_some()
    }

    /// Builds an adapter for `engine_type`
    ///
    /// The lookup is case-insensitive. Every call constructs a new adapter,
    /// which applies the engine's default port and image to `config`.
    /// The configuration is not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedEngine`] if no adapter is registered
    /// and the fallback is disabled or fails; in the latter case the
    /// synthesizer's reason is included.
    pub fn get_adapter(
        &self,
        engine_type: &str,
        config: DatabaseConfig,
    ) -> Result<Box<dyn DatabaseAdapter>, RegistryError> {
        let engine_type = engine_type.to_lowercase();

        if let Some(factory) = self.factory(&engine_type) {
            tracing::info!(
                engine_type = %engine_type,
                implementation = factory.implementation_name(),
                "Creating adapter"
            );
            return Ok(factory.create(config));
        }

        let Some(synthesizer) = &self.fallback else {
            tracing::error!(engine_type = %engine_type, "Unsupported database type");
            return Err(RegistryError::unsupported(engine_type));
        };

        tracing::warn!(
            engine_type = %engine_type,
            "No registered adapter, attempting adapter synthesis"
        );
        synthesizer.synthesize(&engine_type, config).map_err(|e| {
            tracing::error!(engine_type = %engine_type, error = %e, "Adapter synthesis failed");
            RegistryError::UnsupportedEngine {
                engine_type: engine_type.clone(),
                reason: Some(e.to_string()),
            }
        })
    }

    /// Registers (or replaces) the factory for `engine_type`
    ///
    /// The factory is probed once with a default configuration; the adapter it
    /// builds must assign a port and image and report the same health check
    /// command as its container descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeConstraint`] if the probe fails.
    pub fn register(
        &self,
        engine_type: &str,
        factory: Arc<dyn AdapterFactory>,
    ) -> Result<(), RegistryError> {
        let engine_type = engine_type.to_lowercase();
        check_contract(&engine_type, factory.as_ref())?;

        let previous = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(engine_type.clone(), Arc::clone(&factory));

        tracing::info!(
            engine_type = %engine_type,
            implementation = factory.implementation_name(),
            replaced = previous.is_some(),
            "Registered adapter"
        );
        Ok(())
    }

    /// Registers a [`ConfiguredAdapter`] type for `engine_type`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeConstraint`] if the adapter fails the
    /// registration probe.
    pub fn register_adapter<A: ConfiguredAdapter>(
        &self,
        engine_type: &str,
    ) -> Result<(), RegistryError> {
        self.register(engine_type, Arc::new(TypedFactory::<A>::new()))
    }

    /// Registers a factory supplied as an untyped value, e.g. by a plugin loader
    ///
    /// The value must be an `Arc<dyn AdapterFactory>` or a [`FnFactory`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeConstraint`] if the value is neither, or if
    /// the factory fails the registration probe.
    pub fn register_dynamic(
        &self,
        engine_type: &str,
        plugin: Box<dyn Any + Send + Sync>,
    ) -> Result<(), RegistryError> {
        let plugin = match plugin.downcast::<Arc<dyn AdapterFactory>>() {
            Ok(factory) => return self.register(engine_type, *factory),
            Err(plugin) => plugin,
        };
        match plugin.downcast::<FnFactory>() {
            Ok(factory) => self.register(engine_type, Arc::new(*factory)),
            Err(_) => Err(RegistryError::type_constraint(
                engine_type.to_lowercase(),
                "value is not an adapter factory",
            )),
        }
    }

    /// Snapshot of the registered engine types, in insertion order
    pub fn list_available_adapters(&self) -> Vec<String> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Whether `engine_type` has a registered factory
    pub fn is_registered(&self, engine_type: &str) -> bool {
        self.factory(&engine_type.to_lowercase()).is_some()
    }

    /// Returns metadata about the adapter registered for `engine_type`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedEngine`] if nothing is registered.
    pub fn get_adapter_info(&self, engine_type: &str) -> Result<AdapterInfo, RegistryError> {
        let engine_type = engine_type.to_lowercase();
        let factory = self
            .factory(&engine_type)
            .ok_or_else(|| RegistryError::unsupported(engine_type.clone()))?;

        Ok(AdapterInfo {
            implementation_name: factory.implementation_name().to_string(),
            description: factory.description().to_string(),
            engine_type,
        })
    }

    fn factory(&self, engine_type: &str) -> Option<Arc<dyn AdapterFactory>> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(engine_type)
            .cloned()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.list_available_adapters())
            .field("fallback_enabled", &self.fallback_enabled())
            .finish()
    }
}

/// Probes a factory with a default configuration
fn check_contract(engine_type: &str, factory: &dyn AdapterFactory) -> Result<(), RegistryError> {
    if factory.implementation_name().is_empty() {
        return Err(RegistryError::type_constraint(
            engine_type,
            "factory has no implementation name",
        ));
    }

    let probe = factory.create(DatabaseConfig::new(engine_type, "probe"));
    if probe.config().port == 0 {
        return Err(RegistryError::type_constraint(
            engine_type,
            "adapter did not assign a default port",
        ));
    }

    let descriptor = probe.container_descriptor();
    if descriptor.image.is_empty() {
        return Err(RegistryError::type_constraint(
            engine_type,
            "adapter did not assign a default container image",
        ));
    }

    let health_check = probe.health_check_command();
    if descriptor.health_check.command != health_check {
        return Err(RegistryError::type_constraint(
            engine_type,
            format!(
                "health check command '{}' differs from container health check '{}'",
                health_check, descriptor.health_check.command
            ),
        ));
    }
    Ok(())
}

//! Adapter synthesis fallback
//!
//! When fallback is enabled on the registry, lookups that miss are handed to
//! an [`AdapterSynthesizer`], which may build an adapter for an engine nobody
//! registered. How such an adapter would be inferred is not defined; the
//! shipped [`UnimplementedSynthesizer`] always declines.

use crate::adapters::traits::DatabaseAdapter;
use crate::config::DatabaseConfig;
use crate::domain::SynthesisError;

/// Builds adapters for engine types that have no registered constructor
pub trait AdapterSynthesizer: Send + Sync {
    /// Attempts to synthesize an adapter
    ///
    /// # Errors
    ///
    /// Returns a [`SynthesisError`] describing why no adapter could be built.
    fn synthesize(
        &self,
        engine_type: &str,
        config: DatabaseConfig,
    ) -> Result<Box<dyn DatabaseAdapter>, SynthesisError>;
}

/// Synthesizer that always fails with [`SynthesisError::NotImplemented`]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedSynthesizer;

impl AdapterSynthesizer for UnimplementedSynthesizer {
    fn synthesize(
        &self,
        engine_type: &str,
        _config: DatabaseConfig,
    ) -> Result<Box<dyn DatabaseAdapter>, SynthesisError> {
        tracing::warn!(engine_type = %engine_type, "Adapter synthesis is not implemented");
        Err(SynthesisError::NotImplemented(engine_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unimplemented_synthesizer_fails() {
        let result = UnimplementedSynthesizer.synthesize("cassandra", DatabaseConfig::new("cassandra", "ks"));
        assert_eq!(
            result.unwrap_err(),
            SynthesisError::NotImplemented("cassandra".to_string())
        );
    }
}

//! Adapter summaries
//!
//! A summary is a point-in-time, secret-free snapshot of what an adapter
//! renders for its configuration, suitable for writing next to generated
//! deployment files.

use crate::adapters::render::{encode_userinfo, shell_quote};
use crate::adapters::{ContainerDescriptor, DatabaseAdapter, VectorSearchKind};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder written in place of secrets
pub const REDACTED: &str = "****";

/// Snapshot of one adapter's rendered configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterSummary {
    /// Engine type
    pub database: String,

    /// Implementation name of the adapter
    pub adapter: String,

    /// Connection string with the password redacted
    pub connection_string: String,

    /// Container descriptor with passwords redacted
    pub container: ContainerDescriptor,

    pub vector_search_supported: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_search_kind: Option<VectorSearchKind>,

    /// When the summary was taken
    pub generated_at: DateTime<Utc>,
}

impl AdapterSummary {
    /// Takes a summary of `adapter`
    pub fn from_adapter(adapter: &dyn DatabaseAdapter) -> Self {
        Self {
            database: adapter.engine_type().to_string(),
            adapter: adapter.implementation_name().to_string(),
            connection_string: redacted_connection_string(adapter),
            container: redacted_descriptor(adapter),
            vector_search_supported: adapter.supports_vector_search(),
            vector_search_kind: adapter.vector_search_kind(),
            generated_at: Utc::now(),
        }
    }

    /// Writes the summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), database = %self.database, "Wrote adapter summary");
        Ok(())
    }
}

/// The adapter's connection string with the password replaced by [`REDACTED`]
pub fn redacted_connection_string(adapter: &dyn DatabaseAdapter) -> String {
    let uri = adapter.connection_string();
    let password = adapter.config().password.expose_secret().to_string();
    if password.is_empty() {
        return uri;
    }
    uri.replacen(
        &format!(":{}@", encode_userinfo(&password)),
        &format!(":{REDACTED}@"),
        1,
    )
}

/// The adapter's container descriptor with passwords replaced by [`REDACTED`]
///
/// Environment values whose key names a password are replaced outright; the
/// command has any token equal to the password replaced.
pub fn redacted_descriptor(adapter: &dyn DatabaseAdapter) -> ContainerDescriptor {
    let mut descriptor = adapter.container_descriptor();
    let password = adapter.config().password.expose_secret().to_string();

    for (key, value) in descriptor.environment.iter_mut() {
        if key.to_uppercase().contains("PASSWORD") {
            *value = REDACTED.to_string();
        }
    }

    if !password.is_empty() {
        // The quoted form first, so no quote characters are left behind
        if let Some(command) = descriptor.command.as_mut() {
            *command = command
                .replace(&shell_quote(&password), REDACTED)
                .replace(&password, REDACTED);
        }
    }
    descriptor
}

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::UnidbConfig;
use crate::domain::errors::UnidbError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into UnidbConfig
/// 4. Applies environment variable overrides (UNIDB_* prefix)
/// 5. Validates the configuration structure
///
/// Individual `[[databases]]` entries are not rejected here; their
/// validation is advisory and reported by the `validate-config` command.
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use unidb::config::loader::load_config;
///
/// let config = load_config("unidb.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<UnidbConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(UnidbError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        UnidbError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(
        path = %path.display(),
        databases = config.databases.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Parses configuration from TOML text
///
/// Performs the same substitution, override and validation steps as
/// [`load_config`].
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn parse_config(contents: &str) -> Result<UnidbConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: UnidbConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        UnidbError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| UnidbError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments may mention ${VAR} without requiring it
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(UnidbError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the UNIDB_* prefix
///
/// Environment variables follow the pattern: UNIDB_<SECTION>_<KEY>
fn apply_env_overrides(config: &mut UnidbConfig) {
    if let Ok(val) = std::env::var("UNIDB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("UNIDB_REGISTRY_LLM_FALLBACK") {
        config.registry.llm_fallback = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("UNIDB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("UNIDB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("UNIDB_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${UNIDB_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("UNIDB_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("UNIDB_LOADER_MISSING_A");
        std::env::remove_var("UNIDB_LOADER_MISSING_B");
        let input = "a = \"${UNIDB_LOADER_MISSING_A}\"\nb = \"${UNIDB_LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("UNIDB_LOADER_MISSING_A"));
        assert!(err.contains("UNIDB_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("UNIDB_LOADER_COMMENTED");
        let input = "# password = \"${UNIDB_LOADER_COMMENTED}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-unidb.toml");
        assert!(matches!(result, Err(UnidbError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[[databases]]
name = "cache"
engine_type = "redis"
database_name = "0"
username = "default"
password = "pw"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.databases.len(), 1);
        assert_eq!(config.databases[0].name, "cache");
        assert_eq!(config.databases[0].config.engine_type(), "redis");
    }

    #[test]
    fn test_parse_config_rejects_bad_toml() {
        let result = parse_config("databases = = 1");
        assert!(matches!(result, Err(UnidbError::Configuration(_))));
    }
}

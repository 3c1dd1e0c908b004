//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AegisConfig;
use crate::config::secret_string;
use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AegisConfig
/// 4. Applies environment variable overrides (AEGIS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`AegisError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use aegis::config::loader::load_config;
///
/// let config = load_config("aegis.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AegisConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AegisError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AegisError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parse, override and validate configuration text
pub fn parse_config(contents: &str) -> Result<AegisConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AegisConfig = toml::from_str(&contents)
        .map_err(|e| AegisError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AegisError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AegisError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(AegisError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using AEGIS_* prefix
///
/// Environment variables follow the pattern: AEGIS_<SECTION>_<KEY>
/// For example: AEGIS_ANONYMIZATION_K, AEGIS_AUDIT_EXPORT_PATH
fn apply_env_overrides(config: &mut AegisConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("AEGIS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config.anonymization.apply_env_overrides()?;
    config.audit.apply_env_overrides()?;

    // Gate overrides
    if let Ok(val) = std::env::var("AEGIS_GATE_PIN") {
        config.gate.pin = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("AEGIS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("AEGIS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("AEGIS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("AEGIS_LOADER_TEST_VAR", "test_value");
        let input = "pin = \"${AEGIS_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "pin = \"test_value\"");
        std::env::remove_var("AEGIS_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("AEGIS_LOADER_MISSING_VAR");
        let input = "pin = \"${AEGIS_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("AEGIS_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# pin = \"${AEGIS_LOADER_COMMENTED_VAR}\"\n[gate]\n";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(AegisError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymization]
k = 4
epsilon = 0.5

[audit]
rate_limit_max_events = 10
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymization.k, 4);
        assert_eq!(config.anonymization.epsilon, 0.5);
        assert_eq!(config.audit.rate_limit_max_events, 10);
    }
}

//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: defaults, then the optional TOML file, then the
/// recognized environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// The environment carries the opaque, deployment-specific values. Each
/// only selects an endpoint or credential; none alters control flow.
fn apply_env_overrides(config: &mut RelayConfig) {
    if let Ok(service_name) = std::env::var("OTEL_SERVICE_NAME") {
        config.observability.service_name = service_name;
    }
    if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.observability.collector_endpoint = endpoint;
    }
    if let Ok(key) = std::env::var("WEATHER_API_KEY") {
        config.weather.api_key = key;
    }
    if let Ok(url) = std::env::var("WEATHER_SERVICE_URL") {
        config.gateway.downstream_url = url;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.gateway.bind_address, "0.0.0.0:8080");
        assert_eq!(config.rates.db_path, "rates.db");
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[weather]\nstage_timeout_ms = 150\n\n[rates]\ndb_path = \"/tmp/history.db\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.weather.stage_timeout_ms, 150);
        assert_eq!(config.rates.db_path, "/tmp/history.db");
        assert_eq!(config.gateway.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn invalid_file_is_rejected_with_all_problems() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[gateway]\nbind_address = \"nope\"\nforward_timeout_ms = 0"
        )
        .unwrap();

        match load_config(Some(file.path())) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}

//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. All errors are
//! collected and reported together, not just the first.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the full configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_bind(&mut errors, "gateway.bind_address", &config.gateway.bind_address);
    check_bind(&mut errors, "weather.bind_address", &config.weather.bind_address);
    check_bind(&mut errors, "rates.bind_address", &config.rates.bind_address);
    if config.observability.metrics_enabled {
        check_bind(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "gateway.downstream_url", &config.gateway.downstream_url);
    check_url(&mut errors, "weather.viacep_url", &config.weather.viacep_url);
    check_url(&mut errors, "weather.weather_url", &config.weather.weather_url);
    check_url(&mut errors, "rates.upstream_url", &config.rates.upstream_url);
    check_url(&mut errors, "postal.brasilapi_url", &config.postal.brasilapi_url);
    check_url(&mut errors, "postal.viacep_url", &config.postal.viacep_url);

    check_positive(
        &mut errors,
        "gateway.forward_timeout_ms",
        config.gateway.forward_timeout_ms,
    );
    check_positive(
        &mut errors,
        "weather.chain_timeout_ms",
        config.weather.chain_timeout_ms,
    );
    check_positive(
        &mut errors,
        "weather.stage_timeout_ms",
        config.weather.stage_timeout_ms,
    );

    if config.rates.db_path.is_empty() {
        errors.push(ValidationError {
            field: "rates.db_path".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_bind(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("not a valid socket address: {value:?}"),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("not a valid URL: {value:?}"),
        });
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: u64) {
    if value == 0 {
        errors.push(ValidationError {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = RelayConfig::default();
        config.gateway.bind_address = "not-an-address".to_string();
        config.weather.stage_timeout_ms = 0;
        config.rates.upstream_url = "::nope::".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay
//! services. All types derive Serde traits for deserialization from config
//! files; every field has a default so a minimal config works.
//!
//! The orchestration budgets that callers depend on (the 300/200/10 ms rate
//! cascade, the 1000 ms race bound) are deliberately NOT configuration;
//! they are constants in their owning modules.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay services.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Gateway service (validating relay in front of the weather chain).
    pub gateway: GatewayConfig,

    /// Weather chain service.
    pub weather: WeatherConfig,

    /// Rate lookup service.
    pub rates: RatesConfig,

    /// Postal-resolver endpoints used by the provider race.
    pub postal: PostalConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Gateway service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// URL of the weather chain hop requests are relayed to.
    pub downstream_url: String,

    /// Budget for one relayed request, in milliseconds.
    pub forward_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            downstream_url: "http://localhost:8081/".to_string(),
            forward_timeout_ms: 5000,
        }
    }
}

/// Weather chain service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Bind address.
    pub bind_address: String,

    /// Base URL of the postal-code resolver.
    pub viacep_url: String,

    /// Base URL of the weather provider.
    pub weather_url: String,

    /// Weather provider API key (usually from WEATHER_API_KEY).
    pub api_key: String,

    /// Budget for the whole chain, in milliseconds.
    pub chain_timeout_ms: u64,

    /// Budget for each stage, in milliseconds; clamped by the chain budget.
    pub stage_timeout_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
            viacep_url: "https://viacep.com.br".to_string(),
            weather_url: "https://api.weatherapi.com".to_string(),
            api_key: String::new(),
            chain_timeout_ms: 4000,
            stage_timeout_ms: 2000,
        }
    }
}

/// Rate lookup service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Bind address.
    pub bind_address: String,

    /// Base URL of the currency-rate provider.
    pub upstream_url: String,

    /// Path of the SQLite history database.
    pub db_path: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
            upstream_url: "https://economia.awesomeapi.com.br".to_string(),
            db_path: "rates.db".to_string(),
        }
    }
}

/// Postal-resolver endpoints for the provider race.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PostalConfig {
    /// BrasilAPI base URL.
    pub brasilapi_url: String,

    /// ViaCEP base URL.
    pub viacep_url: String,
}

impl Default for PostalConfig {
    fn default() -> Self {
        Self {
            brasilapi_url: "https://brasilapi.com.br".to_string(),
            viacep_url: "https://viacep.com.br".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name reported in logs (usually from OTEL_SERVICE_NAME).
    pub service_name: String,

    /// Trace collector endpoint (usually from OTEL_EXPORTER_OTLP_ENDPOINT).
    /// Recognized and recorded; exporter wiring lives outside this crate.
    pub collector_endpoint: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "lookup-relay".to_string(),
            collector_endpoint: String::new(),
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

//! Weather-by-postal-code domain.

use serde::Serialize;

pub mod chain;

pub use chain::WeatherChain;

/// Final report for a resolved postal code, with derived unit conversions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherReport {
    /// Derive the Fahrenheit and Kelvin values from a Celsius reading.
    ///
    /// Kelvin uses the whole-number 273 offset the downstream consumers of
    /// this payload already round to.
    pub fn from_celsius(city: String, temp_c: f64) -> Self {
        Self {
            city,
            temp_c,
            temp_f: temp_c * 1.8 + 32.0,
            temp_k: temp_c + 273.0,
        }
    }
}

//! Weather snapshot returned per query.

use serde::{Deserialize, Serialize};

/// Normalized weather snapshot for one city.
///
/// Values are passed through from the provider verbatim: temperature in °C,
/// humidity in %, wind in km/h, pressure in hPa. Produced fresh on every
/// request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temp_c: f64,
    pub condition: String,
    /// Provider icon reference (protocol-relative URL)
    pub icon: String,
    pub humidity: i64,
    pub pressure: f64,
    pub wind_kph: f64,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider client.
//!
//! Every lookup is a live upstream fetch: no retry, no caching, no timeout
//! override beyond the transport default. Provider errors map to a single
//! `NotFound` carrying the provider's human-readable message.

use crate::error::AppError;
use crate::models::WeatherSnapshot;
use serde::Deserialize;

/// Weather API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new client. `base_url` normally points at the real provider
    /// and at a local stub in tests.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the current weather snapshot for `city`.
    pub async fn current(&self, city: &str) -> Result<WeatherSnapshot, AppError> {
        let url = format!("{}/current.json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let detail = response
                .json::<ProviderErrorBody>()
                .await
                .ok()
                .map(|b| b.error.message)
                .unwrap_or_else(|| "City not found".to_string());
            return Err(AppError::NotFound(detail));
        }

        let payload = response
            .json::<CurrentWeatherResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))?;

        Ok(payload.into_snapshot())
    }
}

/// Successful provider response (the fields we keep).
#[derive(Debug, Clone, Deserialize)]
struct CurrentWeatherResponse {
    location: ProviderLocation,
    current: ProviderCurrent,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderLocation {
    name: String,
    country: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderCurrent {
    temp_c: f64,
    condition: ProviderCondition,
    humidity: i64,
    pressure_mb: f64,
    wind_kph: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderCondition {
    text: String,
    icon: String,
}

impl CurrentWeatherResponse {
    /// Reshape the provider payload into the snapshot, values verbatim.
    fn into_snapshot(self) -> WeatherSnapshot {
        WeatherSnapshot {
            city: self.location.name,
            country: self.location.country,
            temp_c: self.current.temp_c,
            condition: self.current.condition.text,
            icon: self.current.condition.icon,
            humidity: self.current.humidity,
            pressure: self.current.pressure_mb,
            wind_kph: self.current.wind_kph,
        }
    }
}

/// Provider error body: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderError {
    message: String,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather proxy route.

use crate::error::Result;
use crate::models::WeatherSnapshot;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/weather", get(get_weather))
}

#[derive(Deserialize)]
pub struct WeatherParams {
    city: String,
}

/// Proxy a current-weather lookup for one city.
///
/// The city string goes to the provider untouched; an unknown city comes
/// back as the provider's own not-found message.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherSnapshot>> {
    let snapshot = state.weather.current(&params.city).await?;
    Ok(Json(snapshot))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skycast API Server
//!
//! Serves the credential management endpoints (signup, password login,
//! Google federated login), the weather proxy, and the frontend page.

use skycast::{
    config::Config,
    db::Db,
    routes::frontend,
    services::{GoogleClient, WeatherClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment. A missing weather API key is a
    // fatal startup error; missing Google credentials only degrade the
    // federated login path.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Skycast API");

    // Initialize the credential store and apply the schema
    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to open credential store");
    tracing::info!(url = %config.database_url, "Credential store ready");

    // Google OAuth client, only when both credentials are present
    let google = config.google_credentials().map(|(id, secret)| {
        tracing::info!(client_id = %id, "Google federated login enabled");
        GoogleClient::new(id.to_string(), secret.to_string())
    });
    if google.is_none() {
        tracing::warn!("Google credentials not set, federated login disabled");
    }

    // Weather provider client
    let weather = WeatherClient::new(
        config.weather_api_key.clone(),
        config.weather_api_url.clone(),
    );

    // Frontend template engine
    let templates = frontend::templates().expect("Failed to load frontend templates");

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google,
        weather,
        templates,
    });

    let app = skycast::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skycast=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{body::Body, http::header, http::Request, Json, Router};
use serde_json::json;
use skycast::config::Config;
use skycast::db::Db;
use skycast::routes::{create_router, frontend};
use skycast::services::{GoogleClient, WeatherClient};
use skycast::AppState;
use std::sync::Arc;

/// Build an app around an explicit config and Google client.
pub async fn build_app(
    config: Config,
    google: Option<GoogleClient>,
) -> (Router, Arc<AppState>) {
    let db = Db::connect(&config.database_url)
        .await
        .expect("in-memory credential store should open");
    let weather = WeatherClient::new(
        config.weather_api_key.clone(),
        config.weather_api_url.clone(),
    );
    let templates = frontend::templates().expect("embedded template should parse");

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google,
        weather,
        templates,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store and a default Google client
/// (never reached over the network by these tests).
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let google = GoogleClient::new(
        "test_client_id".to_string(),
        "test_client_secret".to_string(),
    );
    build_app(config, Some(google)).await
}

/// Build a form-encoded POST request.
#[allow(dead_code)]
pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body should collect");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Spawn a stub weather provider on an ephemeral port.
///
/// Knows one city ("London"); anything else gets the provider's error shape.
/// Returns the base URL to point the weather client at.
#[allow(dead_code)]
pub async fn spawn_weather_stub() -> String {
    use axum::extract::Query;
    use axum::routing::get;

    #[derive(serde::Deserialize)]
    struct Params {
        q: String,
    }

    async fn current(Query(params): Query<Params>) -> axum::response::Response {
        if params.q == "London" {
            Json(json!({
                "location": { "name": "London", "country": "United Kingdom" },
                "current": {
                    "temp_c": 11.5,
                    "condition": {
                        "text": "Partly cloudy",
                        "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png"
                    },
                    "humidity": 82,
                    "pressure_mb": 1012.0,
                    "wind_kph": 13.3
                }
            }))
            .into_response()
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": { "code": 1006, "message": "No matching location found." }
                })),
            )
                .into_response()
        }
    }

    let app = Router::new().route("/v1/current.json", get(current));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1", addr)
}

/// Spawn a stub Google token + userinfo endpoint pair vouching for `email`.
///
/// Returns (token_url, userinfo_url).
#[allow(dead_code)]
pub async fn spawn_google_stub(email: &str) -> (String, String) {
    use axum::routing::{get, post};

    let email = email.to_string();

    let app = Router::new()
        .route(
            "/token",
            post(|| async {
                Json(json!({
                    "access_token": "stub-access-token",
                    "token_type": "Bearer",
                    "expires_in": 3600,
                    "id_token": "stub-id-token"
                }))
            }),
        )
        .route(
            "/userinfo",
            get(move || async move {
                Json(json!({
                    "email": email,
                    "email_verified": true,
                    "name": "Stub User"
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (
        format!("http://{}/token", addr),
        format!("http://{}/userinfo", addr),
    )
}

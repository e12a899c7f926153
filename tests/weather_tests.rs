// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather proxy tests against a stub upstream provider.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use skycast::config::Config;
use skycast::services::GoogleClient;
use tower::ServiceExt;

mod common;

async fn app_with_stub_weather() -> axum::Router {
    let base_url = common::spawn_weather_stub().await;
    let mut config = Config::test_default();
    config.weather_api_url = base_url;

    let google = GoogleClient::new(
        "test_client_id".to_string(),
        "test_client_secret".to_string(),
    );
    let (app, _) = common::build_app(config, Some(google)).await;
    app
}

#[tokio::test]
async fn test_weather_known_city() {
    let app = app_with_stub_weather().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/weather?city=London")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    // All seven snapshot fields, values passed through unconverted
    assert_eq!(body["city"], "London");
    assert_eq!(body["country"], "United Kingdom");
    assert_eq!(body["temp_c"], 11.5);
    assert_eq!(body["condition"], "Partly cloudy");
    assert_eq!(body["icon"], "//cdn.weatherapi.com/weather/64x64/day/116.png");
    assert_eq!(body["humidity"], 82);
    assert_eq!(body["pressure"], 1012.0);
    assert_eq!(body["wind_kph"], 13.3);
}

#[tokio::test]
async fn test_weather_unknown_city() {
    let app = app_with_stub_weather().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/weather?city=Qwxyz123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;

    // The provider's own message surfaces verbatim
    assert_eq!(body["detail"], "No matching location found.");
}

#[tokio::test]
async fn test_weather_requires_city_param() {
    let app = app_with_stub_weather().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/weather")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_is_public() {
    // No Authorization header anywhere in this file; this case just makes
    // the contract explicit.
    let app = app_with_stub_weather().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/weather?city=London")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

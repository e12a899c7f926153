// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered frontend page.
//!
//! One Tera template embedded in the binary. The page owns the per-tab
//! session context (user, token, logout flag) and performs the one-time
//! adopt-token-from-URL transition after the OAuth redirect.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;
use tera::Tera;

const APP_TEMPLATE: &str = include_str!("../../templates/app.html");

/// Build the template engine with the embedded frontend template.
pub fn templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("app.html", APP_TEMPLATE)?;
    Ok(tera)
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/app", get(app_page))
}

/// Render the frontend page.
async fn app_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let mut context = tera::Context::new();
    context.insert("google_enabled", &state.google.is_some());

    let html = state
        .templates
        .render("app.html", &context)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render failed: {}", e)))?;

    Ok(Html(html))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Skycast: credential-backed weather lookup service
//!
//! This crate provides the backend API for user signup, password and Google
//! federated login, and a proxied weather lookup, plus the server-rendered
//! frontend page that drives it all from the browser.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::{GoogleClient, WeatherClient};
use tera::Tera;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    /// Present only when Google OAuth credentials are configured.
    pub google: Option<GoogleClient>,
    pub weather: WeatherClient,
    pub templates: Tera,
}

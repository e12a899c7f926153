// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod user;
pub mod weather;

pub use user::{AccountKind, User};
pub use weather::WeatherSnapshot;

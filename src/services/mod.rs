// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google;
pub mod password;
pub mod token;
pub mod weather;

pub use google::GoogleClient;
pub use weather::WeatherClient;

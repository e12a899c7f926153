// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::AccountKind;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(get_me))
}

/// Current account response.
#[derive(Serialize)]
pub struct MeResponse {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub kind: AccountKind,
}

/// Resolve the verified token subject to the account it names.
///
/// A valid token whose user row no longer exists is a 404, not a crash:
/// tokens outlive rows in principle even though this service never deletes.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let row = state
        .db
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse {
        email: row.email.clone(),
        mobile: row.mobile.clone(),
        kind: row.account_kind(),
    }))
}

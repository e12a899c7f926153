// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup, password login, and Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::issue_token;
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/token", post(login))
        .route("/auth/google", get(auth_google))
        .route("/auth/google/callback", get(auth_google_callback))
}

// ─── Signup ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    mobile: Option<String>,
    password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new user with a password and at least one identifier.
async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Json<MessageResponse>> {
    let email = normalized(form.email);
    let mobile = normalized(form.mobile);

    if email.is_none() && mobile.is_none() {
        return Err(AppError::Validation("Email or mobile required".to_string()));
    }

    // Pre-check both identifiers for the common case; the store's uniqueness
    // constraint still decides concurrent races.
    for identifier in [email.as_deref(), mobile.as_deref()].into_iter().flatten() {
        if state.db.find_user(identifier).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
    }

    let password_hash = hash_password(&form.password)?;

    let user = state
        .db
        .create_user(email.as_deref(), mobile.as_deref(), Some(&password_hash))
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Treat an absent or empty form field as no identifier.
fn normalized(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

// ─── Password login ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Log in with an email-or-mobile identifier and a password.
///
/// All failure shapes (unknown user, federation-only account, wrong
/// password) collapse into one "Invalid credentials" response.
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let Some(user) = state.db.find_user(&form.username).await? else {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    };

    // Federation-only accounts have no hash and can never password-login
    let verified = match user.password.as_deref() {
        Some(hash) => verify_password(&form.password, hash)?,
        None => false,
    };
    if !verified {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let access_token = issue_token(user.email.as_deref(), &state.config.jwt_signing_key)?;

    tracing::info!(user_id = user.id, "Password login succeeded");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

// ─── Google federated login ──────────────────────────────────

/// Start the OAuth flow - redirect to Google's consent page.
async fn auth_google(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
) -> Result<Redirect> {
    let google = state
        .google
        .as_ref()
        .ok_or(AppError::FederationUnavailable)?;

    let oauth_state = sign_state(&state.config.frontend_url, &state.config.oauth_state_key)?;
    let callback_url = callback_url_from_headers(&headers);

    let auth_url = google.authorize_url(&callback_url, &oauth_state);

    tracing::info!(
        frontend_url = %state.config.frontend_url,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange the code, provision the user, hand the token
/// back to the frontend.
///
/// The token and email travel to the frontend as URL query parameters; the
/// exposure tradeoff of that delivery path is recorded in DESIGN.md.
async fn auth_google_callback(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    let google = state
        .google
        .as_ref()
        .ok_or(AppError::FederationUnavailable)?;

    // Decode and verify the frontend URL from the state parameter
    let frontend_url = params
        .state
        .as_deref()
        .and_then(|s| verify_and_decode_state(s, &state.config.oauth_state_key))
        .unwrap_or_else(|| {
            tracing::warn!(
                "Invalid or tampered state parameter, falling back to default frontend URL"
            );
            state.config.frontend_url.clone()
        });

    // Check for OAuth errors reported by the provider
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        let redirect = format!("{}?error={}", frontend_url, urlencoding::encode(&error));
        return Ok(Redirect::temporary(&redirect));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::Validation("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");

    let callback_url = callback_url_from_headers(&headers);
    let tokens = google.exchange_code(&code, &callback_url).await?;
    let userinfo = google.fetch_userinfo(&tokens.access_token).await?;
    let email = userinfo.verified_email()?;

    // Find-or-create by verified email: provisioning is idempotent, and a
    // concurrent first login losing the insert race falls back to the row
    // the winner created.
    let user = match state.db.find_by_email(email).await? {
        Some(user) => user,
        None => match state.db.create_user(Some(email), None, None).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Provisioned federated user");
                user
            }
            Err(AppError::Conflict(_)) => state
                .db
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?,
            Err(e) => return Err(e),
        },
    };

    let jwt = issue_token(user.email.as_deref(), &state.config.jwt_signing_key)?;

    tracing::info!(user_id = user.id, "Federated login succeeded");

    let redirect_url = format!(
        "{}?token={}&email={}",
        frontend_url,
        jwt,
        urlencoding::encode(email)
    );

    Ok(Redirect::temporary(&redirect_url))
}

/// Build the OAuth callback URL from the request's Host header.
fn callback_url_from_headers(headers: &axum::http::HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            std::env::var("API_HOST").unwrap_or_else(|_| "localhost:8000".to_string())
        });

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}/auth/google/callback", scheme, host)
}

/// Sign the frontend URL plus a timestamp into the OAuth state parameter.
fn sign_state(frontend_url: &str, secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    // Data payload: "frontend_url|timestamp_hex"
    let state_payload = format!("{}|{:x}", frontend_url, timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(state_payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    // "payload|signature_hex", base64 encoded for the URL
    let signed_state = format!("{}|{}", state_payload, hex::encode(signature));

    Ok(URL_SAFE_NO_PAD.encode(signed_state.as_bytes()))
}

/// Verify the HMAC signature and decode the frontend URL from the OAuth
/// state parameter.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Format is "frontend_url|timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    if parts.len() != 3 {
        return None;
    }

    let frontend_url = parts[0];
    let timestamp_hex = parts[1];
    let signature_hex = parts[2];

    // Reconstruct payload and verify signature
    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(frontend_url.to_string())
}

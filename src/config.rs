//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup into an immutable `Config` that is
//! injected into handlers through the shared state.

use std::env;

/// Hardcoded development fallback for the token signing key.
///
/// `from_env` logs a loud warning whenever this is used; production
/// deployments must set SECRET_KEY.
const DEV_FALLBACK_SIGNING_KEY: &str = "supersecret";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin for OAuth redirects
    pub frontend_url: String,
    /// Credential store URL (SQLite)
    pub database_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
    /// Google OAuth client ID (public); None disables federated login
    pub google_client_id: Option<String>,
    /// Google OAuth client secret; None disables federated login
    pub google_client_secret: Option<String>,
    /// Weather provider API key (required)
    pub weather_api_key: String,
    /// Weather provider base URL
    pub weather_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing WEATHER_API_KEY is a hard error. A missing SECRET_KEY falls
    /// back to an insecure development default and logs a warning.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = match env::var("SECRET_KEY") {
            Ok(key) => key.into_bytes(),
            Err(_) => {
                tracing::warn!(
                    "SECRET_KEY not set, using insecure development fallback; \
                     do NOT run production with this key"
                );
                DEV_FALLBACK_SIGNING_KEY.as_bytes().to_vec()
            }
        };

        // The OAuth state key defaults to the signing key unless split out
        let oauth_state_key = env::var("OAUTH_STATE_KEY")
            .map(String::into_bytes)
            .unwrap_or_else(|_| jwt_signing_key.clone());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000/app".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:users.db".to_string()),
            jwt_signing_key,
            oauth_state_key,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            weather_api_key: env::var("WEATHER_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WEATHER_API_KEY"))?,
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "http://api.weatherapi.com/v1".to_string()),
        })
    }

    /// Google OAuth credentials, present only when both halves are set.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        match (&self.google_client_id, &self.google_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8000,
            frontend_url: "http://localhost:8000/app".to_string(),
            database_url: "sqlite::memory:".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            oauth_state_key: b"test_state_key".to_vec(),
            google_client_id: Some("test_client_id".to_string()),
            google_client_secret: Some("test_client_secret".to_string()),
            weather_api_key: "test_weather_key".to_string(),
            weather_api_url: "http://127.0.0.1:1/v1".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because the cases share process-wide environment state.
    #[test]
    fn test_config_from_env() {
        env::remove_var("WEATHER_API_KEY");
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::Missing("WEATHER_API_KEY"))
        ));

        env::set_var("WEATHER_API_KEY", "key123");
        env::set_var("SECRET_KEY", "signing_key_for_tests");
        env::remove_var("GOOGLE_CLIENT_ID");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.weather_api_key, "key123");
        assert_eq!(config.jwt_signing_key, b"signing_key_for_tests");
        assert_eq!(config.port, 8000);
        assert!(config.google_credentials().is_none());
    }
}

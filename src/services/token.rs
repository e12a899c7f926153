// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs bound to the user's email. Validity
//! is purely signature plus expiry at verification time; there is no
//! server-side session table and no revocation list.

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed session lifetime: 60 minutes from issuance.
pub const ACCESS_TOKEN_TTL_SECS: usize = 60 * 60;

/// JWT claims structure.
///
/// The subject is the user's email. Accounts that only have a mobile number
/// get a token with no subject; such a token passes the signature and expiry
/// checks but fails verification, exactly as a missing claim should.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Issue a session token for `subject`.
pub fn issue_token(subject: Option<&str>, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: subject.map(String::from),
        iat: now,
        exp: now + ACCESS_TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a session token and return its subject.
///
/// A bad signature, a passed expiry, and an absent subject claim all fail
/// uniformly as `AppError::Auth`. Resolving the subject to a live user row
/// is the caller's job.
pub fn verify_token(token: &str, signing_key: &[u8]) -> Result<String, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation)
        .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    token_data
        .claims
        .sub
        .ok_or_else(|| AppError::Auth("Invalid token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token(Some("a@example.com"), KEY).unwrap();
        let subject = verify_token(&token, KEY).unwrap();
        assert_eq!(subject, "a@example.com");
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = issue_token(Some("a@example.com"), KEY).unwrap();
        let err = verify_token(&token, b"some_other_key").unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_expired_token_is_auth_error() {
        // Hand-roll claims with exp in the past
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize;
        let claims = Claims {
            sub: Some("a@example.com".to_string()),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        let err = verify_token(&token, KEY).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_absent_subject_is_auth_error() {
        // A mobile-only account yields a token with no subject
        let token = issue_token(None, KEY).unwrap();
        let err = verify_token(&token, KEY).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_ttl_is_sixty_minutes() {
        let token = issue_token(Some("a@example.com"), KEY).unwrap();

        let key = DecodingKey::from_secret(KEY);
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(&token, &key, &validation).unwrap();

        assert_eq!(data.claims.exp - data.claims.iat, ACCESS_TOKEN_TTL_SECS);
    }
}

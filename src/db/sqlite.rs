// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite-backed credential store.
//!
//! One table, one row per user. Duplicate-identifier races between
//! concurrent signups are resolved by the store's uniqueness constraints:
//! the losing writer gets a `Conflict`, never a silent overwrite.

use crate::error::AppError;
use crate::models::User;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Embedded schema, applied at startup.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE,
    mobile TEXT UNIQUE,
    password TEXT
)";

/// Credential store handle. Cheap to clone.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if necessary) the store at `url` and apply the schema.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        // In-memory SQLite gives every pooled connection its own private
        // database, so cap the pool at one connection there.
        let in_memory = url.contains(":memory:");

        let connection_url = if in_memory || url.contains('?') {
            url.to_string()
        } else {
            // Create the database file on first run
            format!("{}?mode=rwc", url)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(&connection_url)
            .await
            .map_err(|e| AppError::Database(format!("connect failed: {}", e)))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| AppError::Database(format!("schema failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Create a user row. Either identifier may be absent, but the caller
    /// must supply at least one; federated provisioning leaves the password
    /// hash unset.
    pub async fn create_user(
        &self,
        email: Option<&str>,
        mobile: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<User, AppError> {
        let result = sqlx::query("INSERT INTO users (email, mobile, password) VALUES (?, ?, ?)")
            .bind(email)
            .bind(mobile)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                email: email.map(String::from),
                mobile: mobile.map(String::from),
                password: password_hash.map(String::from),
            }),
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Look up a user by identifier, matching either the email or the mobile
    /// column. No trimming, no case folding.
    pub async fn find_user(&self, identifier: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, mobile, password FROM users WHERE email = ? OR mobile = ?",
        )
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by email only (the federated login key).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT id, email, mobile, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Total number of user rows.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User row in the credential store.
///
/// Exactly one table, one row per user. `email` and `mobile` are each unique
/// among non-null values; `password` is the Argon2id hash and is unset for
/// federation-only accounts.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub mobile: Option<String>,
    /// Password hash (PHC string). Never serialized to API responses.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// How an account can authenticate.
///
/// A tagged classification instead of leaving callers to infer trust
/// boundaries from which columns happen to be null. An account with a
/// password and an email can use both paths, since any verified Google email
/// can federate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Password,
    Federated,
    Both,
}

impl User {
    /// Classify which login paths this account supports.
    pub fn account_kind(&self) -> AccountKind {
        match (&self.password, &self.email) {
            (Some(_), Some(_)) => AccountKind::Both,
            (Some(_), None) => AccountKind::Password,
            (None, _) => AccountKind::Federated,
        }
    }
}

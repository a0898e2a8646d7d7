//! Temporary credential set.
//!
//! Represents the triple returned by an assume-role exchange. The three
//! fields are always created and consumed together.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::core::constants::{ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR, SESSION_TOKEN_VAR};

/// Temporary AWS credentials.
#[derive(Clone)]
pub struct CredentialSet {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
    session_token: Zeroizing<String>,
    expiration: Option<DateTime<Utc>>,
}

impl CredentialSet {
    /// Create a credential set from its three fields.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: Zeroizing::new(secret_access_key.into()),
            session_token: Zeroizing::new(session_token.into()),
            expiration: None,
        }
    }

    /// Attach the expiry reported by STS.
    pub fn with_expiration(mut self, expiration: Option<DateTime<Utc>>) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    /// The three environment entries, in publication order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (ACCESS_KEY_ID_VAR, self.access_key_id()),
            (SECRET_ACCESS_KEY_VAR, self.secret_access_key()),
            (SESSION_TOKEN_VAR, self.session_token()),
        ]
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSet")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

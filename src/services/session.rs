//! Session provider: credential check, session issue/lookup, sign-out.
//!
//! ARCHITECTURE
//! ============
//! Browsers hold a random 32-byte hex token in an HttpOnly cookie. Only the
//! SHA-256 digest of the token is stored, so a leaked sessions table cannot
//! be replayed as cookies.
//!
//! TRADE-OFFS
//! ==========
//! Unknown emails and wrong passwords produce the same error, and an unknown
//! email still pays for one Argon2 verification against a throwaway hash, so
//! neither the response nor its latency reveals which addresses exist.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt::Write;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::flow::forms::CredentialCheck;
use crate::flow::session::SessionUser;
use crate::services::accounts::{hash_password, normalize_email, verify_password};
use crate::store::{AccountStore, StoreError, UserRecord};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Storage key for a session token.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Hash of a random secret nobody knows, verified when no user matches.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_password(&generate_token()).ok());

fn verify_unknown_user(password: &str) {
    if let Some(hash) = UNKNOWN_USER_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

/// A freshly issued session: the cookie token and the identity behind it.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: SessionUser,
}

impl From<UserRecord> for SessionUser {
    fn from(user: UserRecord) -> Self {
        let name = Some(user.name).filter(|n| !n.trim().is_empty());
        Self { name, email: user.email }
    }
}

#[derive(Clone)]
pub struct SessionProvider {
    store: Arc<dyn AccountStore>,
    ttl: Duration,
}

impl SessionProvider {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Verify credentials and issue a session.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for an unknown email or a wrong
    /// password; [`AuthError::Store`] if the store fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let user = match normalize_email(email) {
            Some(email) => self.store.find_user_by_email(&email).await?,
            None => None,
        };
        let Some(user) = user else {
            verify_unknown_user(password);
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token();
        self.store
            .insert_session(&hash_token(&token), user.id, self.ttl)
            .await?;
        tracing::info!(user_id = %user.id, "session created");
        Ok(IssuedSession { token, user: user.into() })
    }

    /// Look up the user behind a token. Unknown and expired tokens yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }
        let user = self.store.find_session_user(&hash_token(token)).await?;
        Ok(user.map(SessionUser::from))
    }

    /// Destroy a session. Safe to call with an unknown or already-deleted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Ok(());
        }
        self.store.delete_session(&hash_token(token)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialCheck for SessionProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        SessionProvider::sign_in(self, email, password).await
    }
}

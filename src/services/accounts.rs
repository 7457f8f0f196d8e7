//! Account creation: field validation, email normalization, password hashing.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::{AccountStore, StoreError, UserRecord};
use crate::views::text;

/// Sign-up payload, shared by the HTML form, the JSON endpoint and the
/// HTTP account client. Missing fields decode as empty strings so they are
/// reported as blank rather than as a decoding failure.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Registration {
    /// First blank field, if any.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        [("name", &self.name), ("email", &self.email), ("password", &self.password)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email")]
    InvalidEmail,
    #[error("email already registered")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::EmailTaken,
            other => Self::Store(other),
        }
    }
}

impl AccountError {
    /// Whether the caller can fix the request (as opposed to a server fault).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidEmail | Self::EmailTaken)
    }

    /// Localized message suitable for an inline form error.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => text::REQUIRED_FIELDS,
            Self::InvalidEmail => text::INVALID_EMAIL,
            Self::EmailTaken => text::EMAIL_TAKEN,
            Self::PasswordHash(_) | Self::Store(_) => text::GENERIC_ERROR,
        }
    }
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Hash a password with Argon2id, returning a PHC string.
///
/// # Errors
///
/// Returns an error if the salt cannot be encoded or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AccountError::PasswordHash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AccountError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string. A malformed hash never
/// verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Validate a registration and create the user.
///
/// # Errors
///
/// Blank fields, malformed or already-registered emails, and store failures.
pub async fn create_account(store: &dyn AccountStore, registration: &Registration) -> Result<UserRecord, AccountError> {
    if let Some(field) = registration.blank_field() {
        return Err(AccountError::MissingField(field));
    }
    let email = normalize_email(&registration.email).ok_or(AccountError::InvalidEmail)?;
    let name = registration.name.trim();
    let password_hash = hash_password(&registration.password)?;

    let user = store.insert_user(name, &email, &password_hash).await?;
    tracing::info!(user_id = %user.id, "account created");
    Ok(user)
}

//! Account and session persistence.
//!
//! DESIGN
//! ======
//! `AccountStore` is the seam between the services and storage. Postgres
//! backs production; the in-memory store backs tests and database-less runs.
//! Both enforce email uniqueness atomically and reject expired sessions on
//! lookup, so callers never see a stale session.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Stored user row. `email` is always normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("session lifetime out of range")]
    TtlOutOfRange,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::DuplicateEmail`] when the
    /// email is already taken.
    async fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn insert_session(&self, token_hash: &str, user_id: Uuid, ttl: Duration) -> Result<(), StoreError>;

    /// Return the session's user if the session exists and has not expired.
    async fn find_session_user(&self, token_hash: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Delete a session. Deleting an unknown session is not an error.
    async fn delete_session(&self, token_hash: &str) -> Result<(), StoreError>;
}

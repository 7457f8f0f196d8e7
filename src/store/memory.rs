//! In-memory `AccountStore` guarded by a single `RwLock`.

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, StoreError, UserRecord};

struct StoredSession {
    user_id: Uuid,
    expires_at: Instant,
}

#[derive(Default)]
struct Inner {
    /// Users keyed by normalized email.
    users: HashMap<String, UserRecord>,
    sessions: HashMap<String, StoredSession>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for MemoryStore {
    async fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
        };
        inner.users.insert(email.to_owned(), record.clone());
        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn insert_session(&self, token_hash: &str, user_id: Uuid, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).ok_or(StoreError::TtlOutOfRange)?;
        let mut inner = self.inner.write().await;
        // Drop expired sessions on the write path to keep the map bounded.
        inner.sessions.retain(|_, s| s.expires_at > now);
        inner
            .sessions
            .insert(token_hash.to_owned(), StoredSession { user_id, expires_at });
        Ok(())
    }

    async fn find_session_user(&self, token_hash: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        let Some(session) = inner.sessions.get(token_hash) else {
            return Ok(None);
        };
        if session.expires_at <= Instant::now() {
            return Ok(None);
        }
        Ok(inner
            .users
            .values()
            .find(|u| u.id == session.user_id)
            .cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), StoreError> {
        self.inner.write().await.sessions.remove(token_hash);
        Ok(())
    }
}

//! Observable session state.
//!
//! DESIGN
//! ======
//! The session is owned by the provider; views only observe it. A
//! `SessionSource` exposes the current snapshot and a `watch` receiver that
//! yields every subsequent change, so gating logic can be driven without the
//! concrete provider.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde::Serialize;
use tokio::sync::watch;

/// Identity attributes the views consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: String,
}

impl SessionUser {
    /// Display name, falling back to the email when the name is missing or blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the provider's session: status plus the user, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub status: SessionStatus,
    pub user: Option<SessionUser>,
}

impl SessionState {
    #[must_use]
    pub fn loading() -> Self {
        Self { status: SessionStatus::Loading, user: None }
    }

    #[must_use]
    pub fn authenticated(user: SessionUser) -> Self {
        Self { status: SessionStatus::Authenticated, user: Some(user) }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self { status: SessionStatus::Unauthenticated, user: None }
    }

    /// Snapshot for a completed lookup.
    #[must_use]
    pub fn resolved(user: Option<SessionUser>) -> Self {
        user.map_or_else(Self::unauthenticated, Self::authenticated)
    }
}

pub trait SessionSource {
    fn current(&self) -> SessionState;

    /// Receiver whose current value is the latest snapshot; `changed()`
    /// resolves on every later update and errors once the source is gone.
    fn subscribe(&self) -> watch::Receiver<SessionState>;
}

/// Writable session source backed by a `watch` channel.
pub struct SessionHandle {
    tx: watch::Sender<SessionState>,
}

impl SessionHandle {
    /// New handle in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(SessionState::loading())
    }

    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    pub fn set(&self, state: SessionState) {
        self.tx.send_replace(state);
    }

    pub fn sign_in(&self, user: SessionUser) {
        self.set(SessionState::authenticated(user));
    }

    pub fn sign_out(&self) {
        self.set(SessionState::unauthenticated());
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSource for SessionHandle {
    fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

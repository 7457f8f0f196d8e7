//! Dashboard gating: session snapshot -> view state -> optional redirect.
//!
//! DESIGN
//! ======
//! Every session notification recomputes a [`ViewState`]; rendering is a
//! pure function of it. A missing session triggers a push to the sign-in
//! path through the injected [`Navigator`]. Pushing the same redirect more
//! than once is harmless, so re-evaluation needs no deduplication.

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::paths;
use super::session::{SessionState, SessionStatus, SessionUser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Session status not known yet: show a placeholder, do nothing.
    Loading,
    /// No session: navigation to sign-in has been requested.
    Redirecting,
    Authenticated(SessionUser),
}

impl ViewState {
    /// `Loading` wins over everything else; otherwise the presence of a user
    /// decides, regardless of the reported status.
    #[must_use]
    pub fn from_session(state: &SessionState) -> Self {
        if state.status == SessionStatus::Loading {
            return Self::Loading;
        }
        match &state.user {
            Some(user) => Self::Authenticated(user.clone()),
            None => Self::Redirecting,
        }
    }
}

/// URL-based navigation primitive.
pub trait Navigator {
    fn push(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn push(&self, path: &str) {
        (**self).push(path);
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn push(&self, path: &str) {
        (**self).push(path);
    }
}

/// Navigator that records the last requested path so a request handler can
/// turn it into a redirect response.
#[derive(Debug, Default)]
pub struct PendingRedirect {
    target: Mutex<Option<String>>,
}

impl PendingRedirect {
    #[must_use]
    pub fn take(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut t| t.take())
    }
}

impl Navigator for PendingRedirect {
    fn push(&self, path: &str) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(path.to_owned());
        }
    }
}

pub struct DashboardGate<N> {
    navigator: N,
}

impl<N: Navigator> DashboardGate<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    /// Compute the view for a snapshot, requesting the sign-in redirect when
    /// there is no session.
    pub fn evaluate(&self, state: &SessionState) -> ViewState {
        let view = ViewState::from_session(state);
        if view == ViewState::Redirecting {
            tracing::debug!(status = ?state.status, "no session, redirecting to sign-in");
            self.navigator.push(paths::SIGN_IN);
        }
        view
    }

    /// Evaluate the current snapshot, then re-evaluate on every change until
    /// the session source is dropped. `render` receives each view.
    pub async fn run<F>(&self, mut updates: watch::Receiver<SessionState>, mut render: F)
    where
        F: FnMut(&ViewState),
    {
        loop {
            let state = updates.borrow_and_update().clone();
            render(&self.evaluate(&state));
            if updates.changed().await.is_err() {
                break;
            }
        }
    }
}

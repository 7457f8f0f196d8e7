//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the account/session store behind its trait object, the session
//! provider built on that store, and the account endpoint used by the
//! sign-up flow (in-process or remote).

use std::sync::Arc;

use crate::config::AppConfig;
use crate::flow::account_api::AccountApi;
use crate::services::session::SessionProvider;
use crate::store::AccountStore;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub sessions: SessionProvider,
    pub accounts: Arc<dyn AccountApi>,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, accounts: Arc<dyn AccountApi>, config: &AppConfig) -> Self {
        let sessions = SessionProvider::new(Arc::clone(&store), config.session_ttl);
        Self { store, sessions, accounts, cookie_secure: config.cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

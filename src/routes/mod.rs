//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! HTML pages (landing, sign-up, sign-in, dashboard) and the small JSON API
//! (session view, account creation) share one Axum router and one state.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::flow::paths;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(paths::HOME, get(pages::landing))
        .route(paths::SIGN_UP, get(pages::sign_up_page).post(pages::sign_up_submit))
        .route(paths::SIGN_IN, get(pages::sign_in_page).post(pages::sign_in_submit))
        .route(paths::SIGN_OUT, post(auth::sign_out))
        .route(paths::DASHBOARD, get(pages::dashboard))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/signup", post(auth::sign_up))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

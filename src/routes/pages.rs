//! HTML page routes.
//!
//! Form posts run the submission flows and either redirect (303) or
//! re-render the page with an inline error (422). The dashboard goes through
//! the gate so its redirect decision matches the flow model exactly.

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::auth::{CurrentSession, clear_session_cookie, session_cookie};
use crate::flow::forms::{self, SignInForm, SignInOutcome, SignUpOutcome};
use crate::flow::gate::{DashboardGate, PendingRedirect};
use crate::services::accounts::Registration;
use crate::state::AppState;
use crate::views::{self, RenderError};

/// HTML response, or a logged 500 if the template failed.
fn page(status: StatusCode, rendered: Result<String, RenderError>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "page render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /`
pub async fn landing() -> Response {
    page(StatusCode::OK, views::landing())
}

/// `GET /auth/signup`
pub async fn sign_up_page() -> Response {
    page(StatusCode::OK, views::sign_up(None, &Registration::default()))
}

/// `POST /auth/signup`
pub async fn sign_up_submit(State(state): State<AppState>, Form(form): Form<Registration>) -> Response {
    match forms::submit_sign_up(state.accounts.as_ref(), &form).await {
        SignUpOutcome::Navigate(location) => Redirect::to(&location).into_response(),
        SignUpOutcome::InlineError(message) => {
            page(StatusCode::UNPROCESSABLE_ENTITY, views::sign_up(Some(&message), &form))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SignInQuery {
    message: Option<String>,
}

/// `GET /auth/signin[?message=...]`
pub async fn sign_in_page(Query(query): Query<SignInQuery>) -> Response {
    page(StatusCode::OK, views::sign_in(None, query.message.as_deref(), ""))
}

/// `POST /auth/signin`
pub async fn sign_in_submit(State(state): State<AppState>, jar: CookieJar, Form(form): Form<SignInForm>) -> Response {
    match forms::submit_sign_in(&state.sessions, &form).await {
        SignInOutcome::Navigate { location, session } => {
            let cookie = session_cookie(session.token, state.cookie_secure, state.sessions.ttl());
            (jar.add(cookie), Redirect::to(&location)).into_response()
        }
        SignInOutcome::InlineError(message) => {
            page(StatusCode::UNPROCESSABLE_ENTITY, views::sign_in(Some(&message), None, &form.email))
        }
    }
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>, jar: CookieJar, current: CurrentSession) -> Response {
    let pending = PendingRedirect::default();
    let view = DashboardGate::new(&pending).evaluate(&current.state());

    if let Some(location) = pending.take() {
        let redirect = Redirect::temporary(&location);
        if current.is_stale() {
            return (jar.add(clear_session_cookie(state.cookie_secure)), redirect).into_response();
        }
        return redirect.into_response();
    }

    let mut response = page(StatusCode::OK, views::dashboard(&view));
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;

//! Auth routes: session extractor, cookies, sign-out, session view, account
//! creation endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::flow::account_api::ErrorPayload;
use crate::flow::paths;
use crate::flow::session::{SessionState, SessionUser};
use crate::services::accounts::{self, AccountError, Registration};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn session_cookie(token: String, secure: bool, ttl: std::time::Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::try_from(ttl).unwrap_or(Duration::MAX))
        .build()
}

pub(crate) fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::MissingField(_) | AccountError::InvalidEmail => StatusCode::BAD_REQUEST,
        AccountError::EmailTaken => StatusCode::CONFLICT,
        AccountError::PasswordHash(_) | AccountError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Session resolved from the cookie. Never rejects for a missing or stale
/// session; only a store failure is an error.
pub struct CurrentSession {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl CurrentSession {
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::resolved(self.user.clone())
    }

    /// A cookie was sent but no live session stands behind it.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.token.is_some() && self.user.is_none()
    }
}

impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar
            .get(COOKIE_NAME)
            .map(|c| c.value().to_owned())
            .filter(|t| !t.is_empty())
        else {
            return Ok(Self { token: None, user: None });
        };

        let app_state = AppState::from_ref(state);
        let user = app_state.sessions.resolve(&token).await.map_err(|e| {
            tracing::error!(error = %e, "session lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

        Ok(Self { token: Some(token), user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/session`: current session status and user.
pub async fn session(current: CurrentSession) -> Json<SessionState> {
    Json(current.state())
}

/// `POST /auth/signout`: delete the session, clear the cookie, go to sign-in.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()) {
        if let Err(e) = state.sessions.sign_out(&token).await {
            tracing::error!(error = %e, "session delete failed");
        }
    }

    let jar = jar.add(clear_session_cookie(state.cookie_secure));
    (jar, Redirect::to(paths::SIGN_IN)).into_response()
}

/// `POST /api/auth/signup`: create an account from `{name, email, password}`.
pub async fn sign_up(State(state): State<AppState>, body: Result<Json<Registration>, JsonRejection>) -> Response {
    let registration = match body {
        Ok(Json(registration)) => registration,
        Err(rejection) => {
            let payload = ErrorPayload { error: Some(rejection.body_text()) };
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    match accounts::create_account(state.store.as_ref(), &registration).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": user.id, "name": user.name, "email": user.email })),
        )
            .into_response(),
        Err(e) => {
            let status = account_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "account creation failed");
            }
            let payload = ErrorPayload { error: Some(e.user_message().to_owned()) };
            (status, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! Sign-up and sign-in submission flows.
//!
//! ERROR HANDLING
//! ==============
//! Business rejections (email taken, wrong credentials, blank fields) become
//! inline messages the user can act on. Transport and storage failures are
//! logged and shown as a generic inline message. Neither kind navigates.

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;

use std::fmt;

use serde::Deserialize;

use super::account_api::{AccountApi, AccountReply};
use super::paths;
use crate::services::accounts::Registration;
use crate::services::session::{AuthError, IssuedSession};
use crate::views::text;

/// Credential verification offered by the session provider.
#[async_trait::async_trait]
pub trait CredentialCheck: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError>;
}

#[derive(Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    Navigate(String),
    InlineError(String),
}

#[derive(Debug, Clone)]
pub enum SignInOutcome {
    Navigate { location: String, session: IssuedSession },
    InlineError(String),
}

/// Submit a sign-up form to the account endpoint.
pub async fn submit_sign_up(api: &dyn AccountApi, form: &Registration) -> SignUpOutcome {
    if form.blank_field().is_some() {
        return SignUpOutcome::InlineError(text::REQUIRED_FIELDS.to_owned());
    }

    match api.create_account(form).await {
        Ok(AccountReply::Created) => SignUpOutcome::Navigate(paths::sign_in_with_message(text::SIGN_UP_SUCCESS)),
        Ok(AccountReply::Rejected { error }) => {
            let message = error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| text::GENERIC_ERROR.to_owned());
            SignUpOutcome::InlineError(message)
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-up submission failed");
            SignUpOutcome::InlineError(text::GENERIC_ERROR.to_owned())
        }
    }
}

/// Submit a sign-in form to the session provider.
pub async fn submit_sign_in(provider: &dyn CredentialCheck, form: &SignInForm) -> SignInOutcome {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return SignInOutcome::InlineError(text::REQUIRED_FIELDS.to_owned());
    }

    match provider.sign_in(&form.email, &form.password).await {
        Ok(session) => SignInOutcome::Navigate { location: paths::DASHBOARD.to_owned(), session },
        Err(AuthError::InvalidCredentials) => SignInOutcome::InlineError(text::INVALID_CREDENTIALS.to_owned()),
        Err(e) => {
            tracing::error!(error = %e, "sign-in failed unexpectedly");
            SignInOutcome::InlineError(text::GENERIC_ERROR.to_owned())
        }
    }
}

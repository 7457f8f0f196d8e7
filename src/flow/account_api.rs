//! Account-creation endpoint as seen by the sign-up flow.
//!
//! The flow only needs "created" or "rejected with a message". The in-process
//! implementation calls the accounts service directly; the HTTP one posts
//! JSON to an external endpoint and reads `{"error": "..."}` on failure.

#[cfg(test)]
#[path = "account_api_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::services::accounts::{self, Registration};
use crate::store::AccountStore;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountReply {
    Created,
    Rejected { error: Option<String> },
}

/// Error body returned by the account endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AccountApiError {
    #[error("account endpoint request failed: {0}")]
    Transport(String),
    #[error("account creation failed: {0}")]
    Internal(String),
}

#[async_trait::async_trait]
pub trait AccountApi: Send + Sync {
    async fn create_account(&self, registration: &Registration) -> Result<AccountReply, AccountApiError>;
}

// =============================================================================
// IN-PROCESS
// =============================================================================

pub struct LocalAccountApi {
    store: Arc<dyn AccountStore>,
}

impl LocalAccountApi {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AccountApi for LocalAccountApi {
    async fn create_account(&self, registration: &Registration) -> Result<AccountReply, AccountApiError> {
        match accounts::create_account(self.store.as_ref(), registration).await {
            Ok(_) => Ok(AccountReply::Created),
            Err(e) if e.is_client_error() => Ok(AccountReply::Rejected { error: Some(e.user_message().to_owned()) }),
            Err(e) => Err(AccountApiError::Internal(e.to_string())),
        }
    }
}

// =============================================================================
// HTTP
// =============================================================================

pub struct HttpAccountApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAccountApi {
    /// Client posting to `endpoint` (full URL of the account-creation route).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AccountApiError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AccountApiError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait::async_trait]
impl AccountApi for HttpAccountApi {
    async fn create_account(&self, registration: &Registration) -> Result<AccountReply, AccountApiError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(registration)
            .send()
            .await
            .map_err(|e| AccountApiError::Transport(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(AccountReply::Created);
        }

        let status = resp.status();
        // Non-JSON error bodies still count as a rejection, just without a message.
        let payload = resp.json::<ErrorPayload>().await.unwrap_or_default();
        tracing::debug!(%status, error = ?payload.error, "account endpoint rejected sign-up");
        Ok(AccountReply::Rejected { error: payload.error })
    }
}

//! Runtime configuration loaded from environment variables.
//!
//! Every knob has a default so the server boots with no environment at all
//! (in-memory store, in-process account endpoint, port 3000).

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: u64 = 720;
/// Ten years.
const MAX_SESSION_TTL_HOURS: u64 = 87_600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("invalid URL for {key}: {reason}")]
    InvalidUrl { key: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    /// External account-creation endpoint. `None` uses the in-process one.
    pub account_api_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
            cookie_secure: false,
            account_api_url: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// - `PORT`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`
    /// - `SESSION_TTL_HOURS`: session lifetime, at most ten years
    /// - `COOKIE_SECURE`: explicit override; otherwise inferred from a
    ///   `PUBLIC_URL` starting with `https://`
    /// - `ACCOUNT_API_URL`: external account-creation endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_hours = session_ttl_hours()?;
        let account_api_url = env_non_empty("ACCOUNT_API_URL");
        if let Some(raw) = &account_api_url {
            url::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
                key: "ACCOUNT_API_URL".into(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            database_url: env_non_empty("DATABASE_URL"),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            session_ttl: Duration::from_secs(ttl_hours * 3600),
            cookie_secure: cookie_secure(),
            account_api_url,
        })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key: key.to_owned(), value: raw }),
        _ => Ok(default),
    }
}

/// `SESSION_TTL_HOURS`, bounded to `1..=MAX_SESSION_TTL_HOURS`.
fn session_ttl_hours() -> Result<u64, ConfigError> {
    let hours = env_parse("SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?;
    if hours == 0 || hours > MAX_SESSION_TTL_HOURS {
        return Err(ConfigError::InvalidValue { key: "SESSION_TTL_HOURS".into(), value: hours.to_string() });
    }
    Ok(hours)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

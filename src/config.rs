//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_FILE: &str = ".skinlab/session.json";
/// Page size the backend paginates diagnosis history with.
pub const DEFAULT_HISTORY_PAGE_SIZE: u64 = 6;
/// Largest `page_size` the backend honours.
pub const MAX_HISTORY_PAGE_SIZE: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub history_page_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SKINLAB_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `SKINLAB_SESSION_FILE`: default `.skinlab/session.json`
    /// - `SKINLAB_HISTORY_PAGE_SIZE`: default 6, between 1 and 100
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            &std::env::var("SKINLAB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        );
        let session_file = std::env::var("SKINLAB_SESSION_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);
        let history_page_size = parse_page_size(std::env::var("SKINLAB_HISTORY_PAGE_SIZE").ok().as_deref())?;

        Ok(Self { api_base_url, session_file, history_page_size })
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_page_size(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_HISTORY_PAGE_SIZE);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid { var: "SKINLAB_HISTORY_PAGE_SIZE", reason: "must be at least 1".into() }),
        Ok(size) if size > MAX_HISTORY_PAGE_SIZE => Err(ConfigError::Invalid {
            var: "SKINLAB_HISTORY_PAGE_SIZE",
            reason: format!("must be at most {MAX_HISTORY_PAGE_SIZE}"),
        }),
        Ok(size) => Ok(size),
        Err(e) => Err(ConfigError::Invalid { var: "SKINLAB_HISTORY_PAGE_SIZE", reason: e.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

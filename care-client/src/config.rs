//! Client configuration
//!
//! The API target comes from a single base-URL variable. Everything else
//! has a default.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Base URL of the REST API (required)
pub const ENV_API_URL: &str = "CARE_API_URL";
/// Request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CARE_API_TIMEOUT_SECS";
/// JSON file holding the persisted session
pub const ENV_SESSION_PATH: &str = "CARE_SESSION_PATH";
/// Conversation polling interval in milliseconds
pub const ENV_POLL_INTERVAL_MS: &str = "CARE_POLL_INTERVAL_MS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Client configuration for connecting to the practice API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Fixed request timeout
    pub timeout: Duration,

    /// Where the session is persisted; `None` keeps it in memory only
    pub session_path: Option<PathBuf>,

    /// Interval between polls of an open conversation
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_path: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ClientError::Config(format!("{ENV_API_URL} must be set")))?;

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be an integer")))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup(ENV_SESSION_PATH).filter(|s| !s.trim().is_empty()) {
            config.session_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{ENV_POLL_INTERVAL_MS} must be an integer"))
            })?;
            config.poll_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the session to this JSON file
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Set the conversation polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

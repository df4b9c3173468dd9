// src/config.rs
use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::ApiError;

pub const DEFAULT_API_URL: &str = "https://localhost:7233/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the marketplace API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut raw = base_url.trim().to_string();
        // joining relative endpoint paths requires the trailing slash
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| {
            ApiError::ValidationFailed(format!("invalid API base URL '{}': {}", raw, e))
        })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Reads `CAMPUSMART_API_URL` and `CAMPUSMART_HTTP_TIMEOUT_SECS`,
    /// falling back to the local development defaults.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        let base = env::var("CAMPUSMART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&base)?;
        if let Ok(secs) = env::var("CAMPUSMART_HTTP_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    "ignoring invalid CAMPUSMART_HTTP_TIMEOUT_SECS value '{}'",
                    secs
                ),
            }
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| {
            ApiError::ValidationFailed(format!("invalid endpoint path '{}': {}", path, e))
        })
    }
}

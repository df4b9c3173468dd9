// src/state.rs

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::catalog::HomeScope;
use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::models::HomePage;
use crate::session::Session;

const HOME_CACHE_TTL_SECS: u64 = 300;

/// Everything a service call needs, constructed once and passed explicitly.
/// There are no process-wide singletons; two contexts are two independent
/// clients with their own sessions and caches.
#[derive(Clone)]
pub struct ClientContext {
    pub http: reqwest::Client,
    pub config: ApiConfig,
    pub session: Arc<Session>,
    pub home_cache: Cache<HomeScope, HomePage>,
}

impl ClientContext {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        let home_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(HOME_CACHE_TTL_SECS))
            .build();
        Ok(Self {
            http,
            config,
            session: Arc::new(Session::default()),
            home_cache,
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }
}

//! Application state

use crate::config::ServerConfig;
use allowgate_core::{AllowList, Authorizer};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Authorizer over the allow-list loaded at startup
    pub authorizer: Arc<Authorizer>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(authorizer: Arc<Authorizer>) -> Self {
        Self {
            authorizer,
            start_time: Instant::now(),
        }
    }

    /// Load the allow-list named by `config` and build the state around it
    ///
    /// Any failure here must keep the server from starting.
    pub fn bootstrap(config: &ServerConfig) -> allowgate_core::Result<Self> {
        let allow_list = AllowList::from_path(&config.allow_list_path)?;
        let authorizer = Authorizer::with_mode(allow_list, config.membership_mode);
        Ok(Self::new(Arc::new(authorizer)))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

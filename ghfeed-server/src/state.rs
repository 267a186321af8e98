use std::sync::Arc;

use ghfeed_core::{FeedResult, PaginationMode, SavedStore};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::github::GithubClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub github: GithubClient,
    // Created empty at start-up, dropped with the process
    pub store: Arc<RwLock<SavedStore>>,
    pub pagination_mode: PaginationMode,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> FeedResult<Self> {
        Ok(AppState {
            github: GithubClient::new(config)?,
            store: Arc::new(RwLock::new(SavedStore::new())),
            pagination_mode: config.pagination_mode,
        })
    }
}

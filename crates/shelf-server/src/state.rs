use std::sync::Arc;

use shelf_repo::BookRepository;

use crate::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub repo: BookRepository,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(repo: BookRepository, config: ServerConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}

//! Unified service container for linequery
//!
//! Provides shared access to all core services.

use crate::core::auth::AuthGate;
use crate::core::config::Config;
use crate::core::search::{SearchEngine, SearchMode};
use std::sync::Arc;

/// Unified services container
///
/// Every connection task clones this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// PSK authentication gate
    pub auth: Arc<AuthGate>,

    /// Exact-match search engine
    pub search: Arc<SearchEngine>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let auth = Arc::new(AuthGate::new(
            config.security.psk_auth,
            &config.security.psk,
        ));

        let mode = if config.search.reread_on_query {
            SearchMode::Reread
        } else {
            SearchMode::Cached
        };
        let search = Arc::new(SearchEngine::new(config.search.file_path.clone(), mode));

        Self {
            auth,
            search,
            config: Arc::new(config),
        }
    }
}

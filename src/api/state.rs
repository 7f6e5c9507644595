//! Application state for the finance engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::FinanceStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded rate configuration and the storage backend.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn FinanceStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: Arc<dyn FinanceStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the storage backend.
    pub fn store(&self) -> &dyn FinanceStore {
        self.store.as_ref()
    }
}

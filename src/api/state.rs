//! Application state for the invoice engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AllocationConfig;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded allocation configuration.
#[derive(Clone)]
pub struct AppState {
    /// The loaded allocation configuration.
    config: Arc<AllocationConfig>,
}

impl AppState {
    /// Creates a new application state with the given configuration.
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the allocation configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AllocationConfig::default())
    }
}

//! Shared application state.

use crate::model::ModelRegistry;

use super::ServerConfig;

/// Built once in `run_server` and handed to every handler.
///
/// The registry is write-once at startup and read-only afterwards, so no
/// synchronization is needed. Tests construct this around stub models.
pub struct AppState {
    pub config: ServerConfig,
    pub registry: ModelRegistry,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: ModelRegistry) -> Self {
        Self { config, registry }
    }
}

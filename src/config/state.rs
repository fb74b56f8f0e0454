// Application state module
// Read-only state shared by every connection

use std::path::PathBuf;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Resolved path of the page served on `GET /`
    pub index_path: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, index_path: PathBuf) -> Self {
        Self { config, index_path }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

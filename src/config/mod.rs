// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    AccessLogFormat, Config, LogLevel, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig,
};

/// Default config file, looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("site.index_file", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }

    /// Resolve where the index page lives.
    ///
    /// `site.root` wins when set; otherwise the page sits next to the
    /// running executable.
    pub fn resolve_index_path(&self) -> Result<PathBuf, ServerError> {
        let root = match &self.site.root {
            Some(root) => PathBuf::from(root),
            None => {
                let exe = std::env::current_exe().map_err(ServerError::ExecutablePath)?;
                exe.parent().map(PathBuf::from).unwrap_or_default()
            }
        };
        Ok(root.join(&self.site.index_file))
    }
}

/// URL announced at startup for a bound listener address
pub fn display_url(addr: &SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}/", addr.port())
    } else {
        format!("http://{addr}/")
    }
}

//! Startup errors
//!
//! Request handling never fails outward: the one runtime failure, an
//! unreadable index page, becomes a 500 response. Everything here stops
//! the process before it serves traffic.

use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to locate the running executable: {0}")]
    ExecutablePath(#[source] std::io::Error),

    #[error("failed to open log file: {0}")]
    Logger(#[source] std::io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

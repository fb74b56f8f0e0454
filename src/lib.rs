//! Minimal HTTP server: serves `index.html` on `GET /`, logs POST bodies,
//! answers 405 to everything else.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

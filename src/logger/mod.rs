//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Request body logging for POST requests
//! - Access logging in several formats
//! - Error and warning logging, optionally to files

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AccessLogFormat, LogLevel, LoggingConfig};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.level,
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn enabled(level: LogLevel) -> bool {
    let max = writer::get().map_or(LogLevel::Info, writer::LogWriter::level);
    level <= max
}

/// Write to info log, bypassing the level filter
fn write_info(lines: &[&str]) {
    if let Some(w) = writer::get() {
        w.write_info(lines);
    } else {
        for line in lines {
            println!("{line}");
        }
    }
}

fn write_error(message: &str) {
    if let Some(w) = writer::get() {
        w.write_error(&[message]);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_server_start(url: &str) {
    write_info(&[&format!("Server running at {url}")]);
}

pub fn log_runtime_workers(workers: Option<usize>) {
    if !enabled(LogLevel::Debug) {
        return;
    }
    match workers {
        Some(n) => write_info(&[&format!("[CONFIG] Using {n} worker threads")]),
        None => write_info(&["[CONFIG] Using default worker threads (CPU cores)"]),
    }
}

/// Log a received POST body as two lines: a label, then the text
pub fn log_request_body(body: &str) {
    write_info(&["Request body:", body]);
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if enabled(LogLevel::Debug) {
        write_info(&[&format!("[Connection] Accepted from: {peer_addr}")]);
    }
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    if enabled(LogLevel::Error) {
        write_error(&format!("[ERROR] Failed to serve connection: {err}"));
    }
}

pub fn log_error(message: &str) {
    if enabled(LogLevel::Error) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_info(message: &str) {
    if enabled(LogLevel::Info) {
        write_info(&[&format!("[INFO] {message}")]);
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    write_info(&[&entry.format(format)]);
}

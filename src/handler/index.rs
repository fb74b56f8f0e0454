//! Index page serving
//!
//! The file is read on every request so edits show up without a restart.

use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve the index page, or 500 if it cannot be read
pub async fn serve_index(index_path: &Path) -> Response<Full<Bytes>> {
    match fs::read(index_path).await {
        Ok(content) => http::build_index_response(Bytes::from(content)),
        Err(_) => http::build_index_error_response(),
    }
}

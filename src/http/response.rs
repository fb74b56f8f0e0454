//! HTTP response building module
//!
//! Builders for the fixed set of responses the dispatcher emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const INDEX_ERROR_BODY: &str = "Error loading index.html";
pub const POST_RECEIVED_BODY: &str = "POST request received\n";
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed\n";

/// Build 200 response carrying the index page verbatim
pub fn build_index_response(content: Bytes) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, "text/html", content)
}

/// Build 500 response for an unreadable index page
pub fn build_index_error_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "text/plain",
        Bytes::from_static(INDEX_ERROR_BODY.as_bytes()),
    )
}

/// Build 200 acknowledgment for a POST
pub fn build_post_received_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::OK,
        "text/plain",
        Bytes::from_static(POST_RECEIVED_BODY.as_bytes()),
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "text/plain",
        Bytes::from_static(METHOD_NOT_ALLOWED_BODY.as_bytes()),
    )
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut fallback = Response::new(Full::new(body));
            *fallback.status_mut() = status;
            fallback
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

//! Request dispatch module
//!
//! Entry point for HTTP request processing:
//! - `GET /` serves the index page
//! - `POST` on any path logs the body
//! - everything else gets 405, including `GET` on other paths

use crate::config::AppState;
use crate::handler::{index, post};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Uri};
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Produces exactly one response per request. The only error is a client
/// body stream failing during a POST.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, B::Error>
where
    B: Body,
    B::Error: Display,
{
    let started = Instant::now();
    let method = req.method().clone();
    let version = req.version();
    let target = request_target(req.uri());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = dispatch(req, &state).await?;

    if state.access_log_enabled() {
        let entry = AccessLogEntry {
            remote_addr: peer_addr,
            time: chrono::Local::now(),
            method,
            target,
            version,
            status: response.status().as_u16(),
            body_bytes: response
                .body()
                .size_hint()
                .exact()
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(0),
            user_agent,
            elapsed: started.elapsed(),
        };
        logger::log_access(&entry, state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, B::Error>
where
    B: Body,
    B::Error: Display,
{
    let method = req.method().clone();
    match method {
        Method::GET if is_root(req.uri()) => Ok(index::serve_index(&state.index_path).await),
        Method::POST => post::receive_post(req.into_body()).await,
        _ => Ok(http::build_405_response()),
    }
}

/// Exact match on the request target as sent: `/?page=2` and the
/// absolute form `http://host/` are not the root
fn is_root(uri: &Uri) -> bool {
    uri.scheme().is_none()
        && uri.authority().is_none()
        && uri.path_and_query().is_some_and(|pq| pq.as_str() == "/")
}

fn request_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}

//! POST body intake
//!
//! Reads the whole body, writes it to the info log and acknowledges.
//! Nothing bounds the body size.

use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::Response;
use std::fmt::Display;

/// Accumulate the request body until end of stream, then log it.
///
/// A body that fails mid-stream is handed back to the connection driver,
/// which drops the connection without a response.
pub async fn receive_post<B>(body: B) -> Result<Response<Full<Bytes>>, B::Error>
where
    B: Body,
    B::Error: Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return Err(e);
        }
    };

    logger::log_request_body(&String::from_utf8_lossy(&bytes));

    Ok(http::build_post_received_response())
}

//! End-to-end tests against a live listener on an ephemeral port.
//!
//! The info log goes to a file so POST body lines can be checked.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use index_server::config::{AppState, Config};
use index_server::{logger, server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

const PAGE: &[u8] = b"<!DOCTYPE html>\n<html><body><h1>Hello</h1></body></html>\n";

static INFO_LOG: OnceLock<PathBuf> = OnceLock::new();

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("index_server_it_{}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Route the info log to a file once per test binary
fn info_log() -> &'static PathBuf {
    INFO_LOG.get_or_init(|| {
        let path = scratch_dir("logs").join("info.log");
        let _ = std::fs::remove_file(&path);
        let mut logging = Config::load_from("nonexistent/config").unwrap().logging;
        logging.access_log_file = Some(path.to_str().unwrap().to_string());
        logger::init(&logging).unwrap();
        path
    })
}

fn read_info_log() -> String {
    std::fs::read_to_string(info_log()).unwrap_or_default()
}

struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

async fn start_server(name: &str, page: Option<&[u8]>) -> TestServer {
    info_log();

    let dir = scratch_dir(name);
    let mut cfg = Config::load_from("nonexistent/config").unwrap();
    cfg.site.root = Some(dir.to_str().unwrap().to_string());
    let index_path = cfg.resolve_index_path().unwrap();
    match page {
        Some(bytes) => std::fs::write(&index_path, bytes).unwrap(),
        None => {
            let _ = std::fs::remove_file(&index_path);
        }
    }

    let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(cfg, index_path));
    let shutdown = Arc::new(Notify::new());
    let handle = tokio::spawn(server::start_server_loop(
        listener,
        state,
        Arc::clone(&shutdown),
    ));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

struct RawResponse {
    status: u16,
    head: String,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

/// Send one raw HTTP/1.1 request and read until the server closes
async fn exchange(addr: SocketAddr, request: &[u8]) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();

    RawResponse {
        status,
        head,
        body: raw[split + 4..].to_vec(),
    }
}

fn simple_request(method: &str, path: &str) -> Vec<u8> {
    format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").into_bytes()
}

fn post_request(path: &str, body: &str) -> Vec<u8> {
    format!(
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

#[tokio::test]
async fn test_get_root_serves_page() {
    let srv = start_server("get_root", Some(PAGE)).await;

    let resp = exchange(srv.addr, &simple_request("GET", "/")).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type").as_deref(), Some("text/html"));
    assert_eq!(resp.body, PAGE);

    let again = exchange(srv.addr, &simple_request("GET", "/")).await;
    assert_eq!(again.body, resp.body);
}

#[tokio::test]
async fn test_get_root_without_page() {
    let srv = start_server("no_page", None).await;

    let resp = exchange(srv.addr, &simple_request("GET", "/")).await;
    assert_eq!(resp.status, 500);
    assert_eq!(resp.header("content-type").as_deref(), Some("text/plain"));
    assert_eq!(resp.body, b"Error loading index.html");
}

#[tokio::test]
async fn test_post_logs_body() {
    let srv = start_server("post", Some(PAGE)).await;
    let body = format!("hello=world&nonce={}", std::process::id());

    let resp = exchange(srv.addr, &post_request("/anything", &body)).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type").as_deref(), Some("text/plain"));
    assert_eq!(resp.body, b"POST request received\n");

    let log = read_info_log();
    assert!(
        log.contains(&format!("Request body:\n{body}\n")),
        "info log missing POST body: {log}"
    );
    assert!(!String::from_utf8_lossy(&resp.body).contains(&body));
}

#[tokio::test]
async fn test_post_empty_body() {
    let srv = start_server("post_empty", Some(PAGE)).await;

    let resp = exchange(srv.addr, &post_request("/", "")).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"POST request received\n");
    assert!(read_info_log().contains("Request body:\n\n"));
}

#[tokio::test]
async fn test_post_invalid_utf8_is_replaced() {
    let srv = start_server("post_invalid_utf8", Some(PAGE)).await;
    let body: &[u8] = b"ab\xffcd\xfe!";
    let mut request = format!(
        "POST /binary HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/octet-stream\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    request.extend_from_slice(body);

    let resp = exchange(srv.addr, &request).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"POST request received\n");
    assert!(read_info_log().contains("Request body:\nab\u{fffd}cd\u{fffd}!\n"));
}

#[tokio::test]
async fn test_post_chunked_body_is_accumulated() {
    let srv = start_server("post_chunked", Some(PAGE)).await;
    let request = b"POST /upload HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
                    Transfer-Encoding: chunked\r\n\r\n\
                    b\r\nfirst-chunk\r\nd\r\n|second-chunk\r\n0\r\n\r\n";

    let resp = exchange(srv.addr, request).await;
    assert_eq!(resp.status, 200);
    assert!(read_info_log().contains("Request body:\nfirst-chunk|second-chunk\n"));
}

#[tokio::test]
async fn test_unmatched_requests_are_405() {
    let srv = start_server("not_allowed", Some(PAGE)).await;

    for (method, path) in [
        ("GET", "/index.html"),
        ("GET", "/missing"),
        ("PUT", "/"),
        ("DELETE", "/"),
    ] {
        let resp = exchange(srv.addr, &simple_request(method, path)).await;
        assert_eq!(resp.status, 405, "{method} {path}");
        assert_eq!(resp.header("content-type").as_deref(), Some("text/plain"));
        assert_eq!(resp.body, b"Method Not Allowed\n");
    }
}

#[tokio::test]
async fn test_shutdown_releases_listener() {
    let srv = start_server("shutdown", Some(PAGE)).await;
    assert_eq!(exchange(srv.addr, &simple_request("GET", "/")).await.status, 200);

    srv.shutdown.notify_one();
    srv.handle.await.unwrap();

    assert!(TcpStream::connect(srv.addr).await.is_err());
}

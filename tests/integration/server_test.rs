//! End-to-end tests against real TCP listeners.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use ansimirror::server::{gemini, http};
use ansimirror::{Catalog, Pacing, Site, TimingMode};

use super::helpers::pack_dir;

const TIMEOUT: Duration = Duration::from_secs(5);

fn site() -> Arc<Site> {
    let catalog = Catalog::scan(pack_dir()).unwrap();
    Arc::new(Site::new(
        Arc::new(catalog),
        "localhost",
        Pacing::new(9600, TimingMode::PerLine),
    ))
}

async fn start_gemini() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(gemini::serve(listener, site(), TIMEOUT));
    addr
}

async fn start_http() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(http::serve(listener, site(), TIMEOUT));
    addr
}

async fn fetch(addr: std::net::SocketAddr, request: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn gemini_quick_download() {
    let addr = start_gemini().await;
    let response = fetch(addr, "gemini://localhost/quick/blocks.ans\r\n").await;
    assert_eq!(
        String::from_utf8(response).unwrap(),
        "20 text/x-ansi\r\n\x1b[0;1;33m██░▒▓\x1b[0m\r\n╔═╗\r\n"
    );
}

#[tokio::test]
async fn gemini_modem_download_takes_time() {
    let addr = start_gemini().await;
    let started = Instant::now();
    // Two lines at 14 400 bps, 50 ms each.
    let response = fetch(addr, "gemini://localhost/b=14400/blocks.ans\r\n").await;
    assert!(started.elapsed() >= Duration::from_millis(90));
    assert!(response.ends_with("╔═╗\r\n".as_bytes()));
}

#[tokio::test]
async fn gemini_list_and_not_found() {
    let addr = start_gemini().await;
    let list = String::from_utf8(fetch(addr, "gemini://localhost/list\r\n").await).unwrap();
    assert!(list.starts_with("20 text/gemini\r\n# 2 works of art\n"));

    let missing = fetch(addr, "gemini://localhost/missing.ans\r\n").await;
    assert_eq!(missing, b"51 Not found\r\n");
}

#[tokio::test]
async fn gemini_client_hangup_does_not_kill_server() {
    let addr = start_gemini().await;
    {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"gemini://localhost/b=300/wide.ans\r\n")
            .await
            .unwrap();
        let mut header = [0u8; 16];
        stream.read_exact(&mut header).await.unwrap();
        assert_eq!(&header, b"20 text/x-ansi\r\n");
    }

    let response = fetch(addr, "gemini://localhost/robots.txt\r\n").await;
    assert!(response.starts_with(b"20 text/plain\r\n"));
}

#[tokio::test]
async fn http_quick_download() {
    let addr = start_http().await;
    let response = fetch(
        addr,
        "GET /quick/wide.ans?utm=1 HTTP/1.1\r\nHost: localhost\r\n\r\n",
    )
    .await;
    let response = String::from_utf8(response).unwrap();
    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Type: text/x-ansi"));
    assert!(head.contains("Connection: close"));
    assert_eq!(body.len(), 104);
}

#[tokio::test]
async fn http_errors() {
    let addr = start_http().await;
    let missing = String::from_utf8(fetch(addr, "GET /missing.ans HTTP/1.1\r\n\r\n").await).unwrap();
    assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"));

    let bad = String::from_utf8(fetch(addr, "GET /b=0/wide.ans HTTP/1.1\r\n\r\n").await).unwrap();
    assert!(bad.starts_with("HTTP/1.1 400 Bad Request\r\n"));

    let method = String::from_utf8(fetch(addr, "DELETE / HTTP/1.1\r\n\r\n").await).unwrap();
    assert!(method.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
}

#[tokio::test]
async fn gemini_source_page() {
    let addr = start_gemini().await;
    let page = String::from_utf8(fetch(addr, "gemini://localhost/source\r\n").await).unwrap();
    assert!(page.starts_with("20 text/gemini\r\n# Source code\n"));
    assert!(page.contains("AGPL-3.0-or-later"));
}

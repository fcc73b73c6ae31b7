//! Plain HTTP front end.
//!
//! Just enough HTTP/1.1 for `curl` and browsers: one `GET` or `HEAD` per
//! connection, responses delimited by closing the connection so artwork can
//! stream without a known length.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::Instrument;

use super::stream::{self, StreamError};
use crate::site::{pages, Response, Site};

/// Upper bound on the request line plus headers.
const MAX_HEAD_LEN: u64 = 8 * 1024;

/// Accept HTTP connections until the listener fails.
pub async fn serve(listener: TcpListener, site: Arc<Site>, request_timeout: Duration) -> Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "http accept failed");
                continue;
            }
        };

        let site = Arc::clone(&site);
        tokio::spawn(
            async move {
                if let Err(e) = handle_connection(socket, &site, request_timeout).await {
                    tracing::warn!(error = %e, "http request failed");
                }
            }
            .instrument(tracing::debug_span!("http", %peer)),
        );
    }
}

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Request {
    method: String,
    path: String,
}

impl Request {
    /// Parse `METHOD TARGET HTTP/x.y`, dropping any query or fragment.
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let method = parts.next()?;
        let target = parts.next()?;
        let version = parts.next()?;
        if parts.next().is_some() || !version.starts_with("HTTP/") {
            return None;
        }
        let path = target.split(['?', '#']).next().unwrap_or_default();
        if !path.starts_with('/') {
            return None;
        }
        Some(Self {
            method: method.to_string(),
            path: path.to_string(),
        })
    }
}

/// Serve a single request on an accepted connection.
pub async fn handle_connection<S>(socket: S, site: &Site, request_timeout: Duration) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(socket);

    let request = match tokio::time::timeout(request_timeout, read_head(reader)).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            write_simple(&mut writer, "400 Bad Request", "Bad request\n").await?;
            return Ok(());
        }
        Err(_) => {
            tracing::debug!("request timed out");
            write_simple(&mut writer, "408 Request Timeout", "Request timeout\n").await?;
            return Ok(());
        }
    };

    let head_only = match request.method.as_str() {
        "GET" => false,
        "HEAD" => true,
        _ => {
            write_simple(&mut writer, "405 Method Not Allowed", "Method not allowed\n").await?;
            return Ok(());
        }
    };

    tracing::debug!(method = %request.method, path = %request.path, "request");
    respond(&mut writer, site.respond(&request.path), head_only).await?;
    writer.shutdown().await.ok();
    Ok(())
}

/// Read the request line and skip the headers.
async fn read_head<R: AsyncRead + Unpin>(reader: R) -> Option<Request> {
    let mut reader = BufReader::new(reader).take(MAX_HEAD_LEN);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.ok()?;
    let request = Request::parse(request_line.trim_end())?;

    loop {
        let mut header = String::new();
        let n = reader.read_line(&mut header).await.ok()?;
        if n == 0 || !header.ends_with('\n') {
            // Connection closed or head too large before the blank line.
            return None;
        }
        if header.trim_end().is_empty() {
            return Some(request);
        }
    }
}

async fn write_head<W: AsyncWrite + Unpin>(
    writer: &mut W,
    status: &str,
    mime: &str,
    content_length: Option<usize>,
) -> Result<()> {
    let mut head = format!("HTTP/1.1 {status}\r\nContent-Type: {mime}\r\nConnection: close\r\n");
    if let Some(length) = content_length {
        head.push_str(&format!("Content-Length: {length}\r\n"));
    }
    head.push_str("\r\n");
    writer.write_all(head.as_bytes()).await?;
    Ok(())
}

async fn write_simple<W: AsyncWrite + Unpin>(writer: &mut W, status: &str, body: &str) -> Result<()> {
    write_head(writer, status, pages::TEXT_MIME, Some(body.len())).await?;
    writer.write_all(body.as_bytes()).await?;
    Ok(())
}

async fn respond<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: Response,
    head_only: bool,
) -> Result<()> {
    match response {
        Response::Page { mime, body } => {
            write_head(writer, "200 OK", mime, Some(body.len())).await?;
            if !head_only {
                writer.write_all(body.as_bytes()).await?;
            }
        }
        Response::NotFound => write_simple(writer, "404 Not Found", "Not found\n").await?,
        Response::BadRequest(reason) => {
            write_simple(writer, "400 Bad Request", &format!("{reason}\n")).await?;
        }
        Response::Artwork { path, pacing } => {
            let artwork = match stream::load_artwork(&path).await {
                Ok(artwork) => artwork,
                Err(e) => {
                    tracing::warn!(error = %e, "artwork listed but unreadable");
                    return write_simple(writer, "404 Not Found", "Not found\n").await;
                }
            };

            write_head(writer, "200 OK", pages::ANSI_MIME, None).await?;
            if head_only {
                return Ok(());
            }
            tracing::debug!(path = %path.display(), %pacing, "streaming artwork");
            match stream::stream_chunks(writer, stream::renderer_for(artwork, pacing)).await {
                Ok(stats) => tracing::debug!(
                    chunks = stats.chunks,
                    bytes = stats.bytes,
                    waited_ms = stats.waited.as_millis() as u64,
                    "transfer complete"
                ),
                Err(StreamError::Disconnected(e)) => {
                    tracing::debug!(error = %e, "client disconnected mid-transfer");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

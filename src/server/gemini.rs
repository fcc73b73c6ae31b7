//! Gemini front end.
//!
//! One request per connection: the client sends an absolute URL terminated
//! by CRLF, the server answers with a `<status> <meta>` header line and, on
//! success, the body. TLS is expected to be terminated in front of this
//! listener.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::Instrument;
use url::Url;

use super::stream::{self, StreamError};
use crate::site::{pages, Response, Site};

/// Longest URL a client may send, excluding the CRLF.
const MAX_REQUEST_LEN: u64 = 1024;

const SUCCESS: u8 = 20;
const NOT_FOUND: u8 = 51;
const PROXY_REQUEST_REFUSED: u8 = 53;
const BAD_REQUEST: u8 = 59;

/// Accept Gemini connections until the listener fails.
pub async fn serve(listener: TcpListener, site: Arc<Site>, request_timeout: Duration) -> Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "gemini accept failed");
                continue;
            }
        };

        let site = Arc::clone(&site);
        tokio::spawn(
            async move {
                if let Err(e) = handle_connection(socket, &site, request_timeout).await {
                    tracing::warn!(error = %e, "gemini request failed");
                }
            }
            .instrument(tracing::debug_span!("gemini", %peer)),
        );
    }
}

/// Serve a single request on an accepted connection.
pub async fn handle_connection<S>(socket: S, site: &Site, request_timeout: Duration) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(socket);

    let request = match tokio::time::timeout(request_timeout, read_request(reader)).await {
        Ok(Ok(request)) => request,
        Ok(Err(reason)) => {
            write_header(&mut writer, BAD_REQUEST, reason).await?;
            return Ok(());
        }
        Err(_) => {
            tracing::debug!("request timed out");
            write_header(&mut writer, BAD_REQUEST, "Request timeout").await?;
            return Ok(());
        }
    };

    let url = match Url::parse(&request) {
        Ok(url) => url,
        Err(_) => {
            write_header(&mut writer, BAD_REQUEST, "Malformed URL").await?;
            return Ok(());
        }
    };
    if url.scheme() != "gemini" {
        write_header(&mut writer, PROXY_REQUEST_REFUSED, "Only gemini:// is served here").await?;
        return Ok(());
    }

    tracing::debug!(path = url.path(), "request");
    respond(&mut writer, site.respond(url.path())).await?;
    writer.shutdown().await.ok();
    Ok(())
}

/// Read the request line, without its CRLF.
async fn read_request<R: AsyncRead + Unpin>(reader: R) -> Result<String, &'static str> {
    let mut line = Vec::new();
    let mut limited = BufReader::new(reader).take(MAX_REQUEST_LEN + 2);
    limited
        .read_until(b'\n', &mut line)
        .await
        .map_err(|_| "Failed to read request")?;

    if !line.ends_with(b"\r\n") {
        return Err("Request must be a URL of at most 1024 bytes followed by CRLF");
    }
    line.truncate(line.len() - 2);
    String::from_utf8(line).map_err(|_| "Request is not valid UTF-8")
}

async fn write_header<W: AsyncWrite + Unpin>(writer: &mut W, status: u8, meta: &str) -> Result<()> {
    writer
        .write_all(format!("{status} {meta}\r\n").as_bytes())
        .await?;
    Ok(())
}

async fn respond<W: AsyncWrite + Unpin>(writer: &mut W, response: Response) -> Result<()> {
    match response {
        Response::Page { mime, body } => {
            write_header(writer, SUCCESS, mime).await?;
            writer.write_all(body.as_bytes()).await?;
        }
        Response::NotFound => write_header(writer, NOT_FOUND, "Not found").await?,
        Response::BadRequest(reason) => write_header(writer, BAD_REQUEST, &reason).await?,
        Response::Artwork { path, pacing } => {
            let artwork = match stream::load_artwork(&path).await {
                Ok(artwork) => artwork,
                Err(e) => {
                    tracing::warn!(error = %e, "artwork listed but unreadable");
                    return write_header(writer, NOT_FOUND, "Not found").await;
                }
            };

            write_header(writer, SUCCESS, pages::ANSI_MIME).await?;
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

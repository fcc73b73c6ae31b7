//! Async delivery of rendered chunks.
//!
//! The renderer only says how long to wait; this is where the wait actually
//! happens, as a tokio timer, so a slow transfer never holds up other
//! connections.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::render::{Chunk, Pacing, RenderError, Renderer};

/// Why a transfer stopped early.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Client went away: {0}")]
    Disconnected(#[source] std::io::Error),
}

/// Totals for one finished transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub chunks: usize,
    pub bytes: usize,
    pub waited: Duration,
}

/// Read an artwork file without blocking the reactor.
pub async fn load_artwork(path: &Path) -> Result<Vec<u8>, RenderError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| RenderError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Build a renderer over an artwork already loaded into memory.
pub fn renderer_for(artwork: Vec<u8>, pacing: Pacing) -> Renderer<Cursor<Vec<u8>>> {
    Renderer::new(Cursor::new(artwork), pacing)
}

/// Sleep for each chunk's wait, then write it.
///
/// Stops at the first render or write error; the remaining chunks are never
/// produced.
pub async fn stream_chunks<W, I>(writer: &mut W, chunks: I) -> Result<StreamStats, StreamError>
where
    W: AsyncWrite + Unpin,
    I: IntoIterator<Item = Result<Chunk, RenderError>>,
{
    let mut stats = StreamStats::default();

    for chunk in chunks {
        let chunk = chunk?;
        if !chunk.wait.is_zero() {
            tokio::time::sleep(chunk.wait).await;
            stats.waited += chunk.wait;
        }
        if !chunk.bytes.is_empty() {
            writer
                .write_all(&chunk.bytes)
                .await
                .map_err(StreamError::Disconnected)?;
            writer.flush().await.map_err(StreamError::Disconnected)?;
        }
        stats.chunks += 1;
        stats.bytes += chunk.bytes.len();
    }

    Ok(stats)
}

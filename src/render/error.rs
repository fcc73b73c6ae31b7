//! Render errors.

use std::path::PathBuf;

/// Errors that can occur while setting up or running a render.
///
/// A control sequence cut off by the end of the source is not an error;
/// the scanner yields what it consumed and ends the stream.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Artwork unavailable: {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read artwork: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid bitrate '{value}': must be a positive integer")]
    InvalidRate { value: String },
}

impl RenderError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRate { .. })
    }
}

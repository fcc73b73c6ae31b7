//! Request path routing.
//!
//! The same URL scheme is served over Gemini and HTTP:
//!
//! - `/` - front page
//! - `/list` - every artwork name
//! - `/robots.txt`
//! - `/source` - where to get this program's source
//! - `/NAME` - modem emulation with the configured default speed
//! - `/quick/NAME` - no throttling
//! - `/b=BPS/NAME` - constant time per line at BPS
//! - `/s=BPS/NAME` - per character simulation at BPS

use crate::render::{Pacing, RenderError, TimingMode};

/// A routed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Front,
    List,
    Robots,
    Source,
    Artwork {
        name: String,
        /// `None` selects the server's default speed.
        pacing: Option<Pacing>,
    },
}

impl Route {
    /// Route a request path.
    ///
    /// Returns `Ok(None)` when nothing matches, and `InvalidRate` when a
    /// speed segment carries a bitrate that is not a positive integer.
    pub fn parse(path: &str) -> Result<Option<Route>, RenderError> {
        let path = path.trim_end_matches('/');

        let route = match path {
            "" => Route::Front,
            "/list" => Route::List,
            "/robots.txt" => Route::Robots,
            "/source" => Route::Source,
            _ => {
                let Some(rest) = path.strip_prefix('/') else {
                    return Ok(None);
                };
                let segments: Vec<&str> = rest.split('/').collect();
                match segments.as_slice() {
                    [name] => artwork(name, None),
                    ["quick", name] => artwork(name, Some(Pacing::Unthrottled)),
                    [speed, name] => match parse_speed(speed)? {
                        Some(pacing) => artwork(name, Some(pacing)),
                        None => return Ok(None),
                    },
                    _ => return Ok(None),
                }
            }
        };
        Ok(Some(route))
    }
}

fn artwork(name: &str, pacing: Option<Pacing>) -> Route {
    Route::Artwork {
        name: name.to_string(),
        pacing,
    }
}

/// Parse a `b=BPS` or `s=BPS` path segment.
fn parse_speed(segment: &str) -> Result<Option<Pacing>, RenderError> {
    let (mode, value) = if let Some(value) = segment.strip_prefix("b=") {
        (TimingMode::PerLine, value)
    } else if let Some(value) = segment.strip_prefix("s=") {
        (TimingMode::PerCharacter, value)
    } else {
        return Ok(None);
    };
    Pacing::parse_throttled(value, mode).map(Some)
}

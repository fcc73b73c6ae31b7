//! ansimirror - ANSI art mirror with modem download emulation
//!
//! Serves an archive of CP437 ANSI artwork over Gemini and plain HTTP,
//! transcoded to UTF-8 and paced like an analog modem transfer.
//!
//! - [`render`] - the streaming renderer: scanning, transcoding, wrapping, pacing
//! - [`catalog`] - artwork name to file lookup
//! - [`site`] - request routing and static pages
//! - [`server`] - Gemini and HTTP listeners

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod server;
pub mod site;

pub use catalog::Catalog;
pub use config::Config;
pub use render::{Chunk, Pacing, RenderError, Renderer, TimingMode};
pub use site::Site;

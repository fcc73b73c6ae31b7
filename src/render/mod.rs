//! Modem emulation streaming renderer.
//!
//! Reads raw CP437 artwork with embedded ANSI control sequences and turns it
//! into UTF-8 output paced like a download over an analog modem.
//!
//! # Module Structure
//!
//! - [`scanner`] - splits the byte stream into printable bytes and control sequences
//! - [`cp437`] - 8-bit to UTF-8 transcoding
//! - [`columns`] - cursor column tracking, 80-column wrap, line assembly
//! - [`pacer`] - bitrate to delivery deadline
//! - [`renderer`] - the chunk iterator tying it together

pub mod columns;
pub mod cp437;
mod error;
pub mod pacer;
mod renderer;
pub mod scanner;

pub use columns::COLUMNS;
pub use error::RenderError;
pub use pacer::{Clock, ManualClock, Pacing, SystemClock, TimingMode, BITS_PER_BYTE};
pub use renderer::{Chunk, Renderer};
pub use scanner::{ScanUnit, Scanner};

//! Column tracking and line assembly.
//!
//! Follows the cursor column closely enough to reproduce the 80-column
//! auto-wrap that DOS artwork relies on. Control sequences are zero width,
//! except cursor forward which moves the column without emitting spaces.

use super::cp437;
use super::scanner::ScanUnit;

/// Screen width the artwork is laid out for.
pub const COLUMNS: usize = 80;

/// Terminator appended to a line that hit the right margin.
const WRAP_TERMINATOR: &[u8] = b"\r\n";

/// A line boundary produced while assembling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `\r`: column reset and pacing tick, the buffer keeps accumulating.
    CarriageReturn,
    /// `\n`: the buffered line is complete.
    LineFeed,
    /// The column reached the right margin; a terminator was appended.
    Wrap,
}

/// Accumulates transcoded output and tracks the cursor column.
#[derive(Debug, Default)]
pub struct LineAssembler {
    column: usize,
    buffer: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor column, always in `0..=COLUMNS`.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Bytes buffered since the last completed line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed one scanned unit, returning the boundary it caused, if any.
    ///
    /// Printable bytes are transcoded from CP437; control sequences are
    /// appended verbatim. Only printable bytes can trigger a wrap.
    pub fn push(&mut self, unit: ScanUnit) -> Option<Boundary> {
        if let Some(n) = unit.cursor_forward() {
            self.column = self.column.saturating_add(n).min(COLUMNS);
        }
        match unit {
            ScanUnit::Printable(byte) => self.push_printable(byte),
            ScanUnit::Control(seq) => {
                self.buffer.extend_from_slice(&seq);
                None
            }
        }
    }

    fn push_printable(&mut self, byte: u8) -> Option<Boundary> {
        self.column += 1;
        cp437::transcode_into(byte, &mut self.buffer);

        match byte {
            b'\r' => {
                self.column = 0;
                Some(Boundary::CarriageReturn)
            }
            b'\n' => {
                self.column = 0;
                Some(Boundary::LineFeed)
            }
            _ if self.column >= COLUMNS => {
                self.buffer.extend_from_slice(WRAP_TERMINATOR);
                self.column = 0;
                Some(Boundary::Wrap)
            }
            _ => None,
        }
    }

    /// Take the buffered bytes, leaving the buffer empty.
    pub fn take_line(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

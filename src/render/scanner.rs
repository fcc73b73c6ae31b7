//! Sequence scanner.
//!
//! Splits a raw artwork byte stream into [`ScanUnit`]s: single printable
//! bytes, or whole control sequences starting with `ESC` and ending at the
//! first ASCII letter. Only the shape needed for column tracking is parsed;
//! everything else about a control sequence is opaque.

use std::io::{self, BufReader, Bytes, Read};

/// The escape byte that starts every control sequence.
pub const ESC: u8 = 0x1b;

/// One step of the scanner.
///
/// Units partition the input: every byte belongs to exactly one unit, in
/// input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanUnit {
    /// A single byte outside any control sequence (C0 controls other than
    /// `ESC` included).
    Printable(u8),
    /// A complete control sequence, or the truncated tail of one when the
    /// source ended mid-sequence.
    Control(Vec<u8>),
}

impl ScanUnit {
    /// Displacement of a `CSI n C` (cursor forward) sequence.
    ///
    /// An empty parameter means 1. Any other parameter shape, or a number
    /// that does not fit, is not treated as cursor movement.
    pub fn cursor_forward(&self) -> Option<usize> {
        match self {
            ScanUnit::Control(seq) => parse_cursor_forward(seq),
            ScanUnit::Printable(_) => None,
        }
    }

    /// Raw bytes of this unit as they appeared in the source.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ScanUnit::Printable(byte) => std::slice::from_ref(byte),
            ScanUnit::Control(seq) => seq,
        }
    }
}

/// Parse the displacement of a raw `ESC [ n C` sequence.
fn parse_cursor_forward(seq: &[u8]) -> Option<usize> {
    let params = seq.strip_prefix(&[ESC, b'['])?.strip_suffix(b"C")?;
    if params.is_empty() {
        return Some(1);
    }
    if !params.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(params).ok()?.parse().ok()
}

/// Pull-based scanner over any byte source.
///
/// Fused: after the source is exhausted or a read fails, `next` keeps
/// returning `None`.
#[derive(Debug)]
pub struct Scanner<R> {
    bytes: Bytes<BufReader<R>>,
    done: bool,
}

impl<R: Read> Scanner<R> {
    pub fn new(source: R) -> Self {
        Self {
            bytes: BufReader::new(source).bytes(),
            done: false,
        }
    }

    /// Consume the rest of a control sequence whose `ESC` was already read.
    fn scan_control(&mut self) -> io::Result<Vec<u8>> {
        let mut seq = vec![ESC];
        for byte in self.bytes.by_ref() {
            let byte = byte?;
            seq.push(byte);
            if byte.is_ascii_alphabetic() {
                return Ok(seq);
            }
        }
        // Source ended inside the sequence: hand back what we have.
        self.done = true;
        Ok(seq)
    }
}

impl<R: Read> Iterator for Scanner<R> {
    type Item = io::Result<ScanUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let unit = match self.bytes.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(e)) => Err(e),
            Some(Ok(ESC)) => self.scan_control().map(ScanUnit::Control),
            Some(Ok(byte)) => Ok(ScanUnit::Printable(byte)),
        };

        if unit.is_err() {
            self.done = true;
        }
        Some(unit)
    }
}

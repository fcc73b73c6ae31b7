//! Modem emulation renderer.
//!
//! Drives the scanner over an artwork source and yields [`Chunk`]s: the bytes
//! of one line (or a carriage-return tick) together with how long the caller
//! should wait before forwarding them. The renderer never sleeps itself; the
//! caller decides how to suspend, which keeps this loop independent of any
//! async runtime.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use super::columns::{Boundary, LineAssembler};
use super::error::RenderError;
use super::pacer::{Clock, Pacer, Pacing, SystemClock};
use super::scanner::Scanner;

/// One piece of output, due after `wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Delay the caller must observe before forwarding `bytes`.
    pub wait: Duration,
    /// UTF-8 text with control sequences passed through verbatim. Empty for
    /// carriage-return ticks.
    pub bytes: Vec<u8>,
}

/// Lazy, finite, single-use sequence of chunks over one artwork source.
///
/// Fused after exhaustion or the first error. Dropping the renderer at any
/// point releases the source.
#[derive(Debug)]
pub struct Renderer<R, C = SystemClock> {
    scanner: Scanner<R>,
    assembler: LineAssembler,
    pacer: Pacer<C>,
    done: bool,
}

impl Renderer<File> {
    /// Open an artwork file for rendering in real time.
    pub fn open(path: impl AsRef<Path>, pacing: Pacing) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RenderError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file, pacing))
    }
}

impl<R: Read> Renderer<R> {
    pub fn new(source: R, pacing: Pacing) -> Self {
        Self::with_clock(source, pacing, SystemClock)
    }
}

impl<R: Read, C: Clock> Renderer<R, C> {
    /// Render with a caller-supplied clock. The pacing schedule starts now.
    pub fn with_clock(source: R, pacing: Pacing, clock: C) -> Self {
        Self {
            scanner: Scanner::new(source),
            assembler: LineAssembler::new(),
            pacer: Pacer::new(pacing, clock),
            done: false,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacer.pacing()
    }

    /// Current tracked cursor column.
    pub fn column(&self) -> usize {
        self.assembler.column()
    }

    fn finish(&mut self) -> Option<Chunk> {
        self.done = true;
        let rest = self.assembler.take_line();
        (!rest.is_empty()).then_some(Chunk {
            wait: Duration::ZERO,
            bytes: rest,
        })
    }
}

impl<R: Read, C: Clock> Iterator for Renderer<R, C> {
    type Item = Result<Chunk, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let unit = match self.scanner.next() {
                None => return self.finish().map(Ok),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(RenderError::Read(e)));
                }
                Some(Ok(unit)) => unit,
            };

            // A whole control sequence is charged as one unit.
            self.pacer.on_unit();

            match self.assembler.push(unit) {
                None => continue,
                Some(Boundary::CarriageReturn) => {
                    return Some(Ok(Chunk {
                        wait: self.pacer.wait(),
                        bytes: Vec::new(),
                    }));
                }
                Some(Boundary::LineFeed | Boundary::Wrap) => {
                    self.pacer.on_line();
                    return Some(Ok(Chunk {
                        wait: self.pacer.wait(),
                        bytes: self.assembler.take_line(),
                    }));
                }
            }
        }
    }
}

impl<R: Read, C: Clock> std::iter::FusedIterator for Renderer<R, C> {}

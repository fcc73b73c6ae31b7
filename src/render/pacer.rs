//! Stream pacing.
//!
//! Turns a configured bitrate into a delivery schedule. The pacer keeps an
//! absolute deadline that only moves forward and reports how long the caller
//! has to wait before showing the next chunk.
//!
//! The deadline is derived from the total number of bits charged since the
//! render started rather than by summing per-step durations, so rounding
//! never accumulates over a long transfer.

use std::cell::Cell;
use std::fmt;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::columns::COLUMNS;
use super::error::RenderError;

/// 8 data bits plus one stop bit (8-N-1 framing).
pub const BITS_PER_BYTE: u64 = 9;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Source of "now" for the pacer.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock that only moves when told to.
///
/// Lets a caller replay a render deterministically: advance it by each
/// chunk's wait instead of sleeping.
#[derive(Debug)]
pub struct ManualClock(Cell<Instant>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Cell::new(Instant::now()))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// How transmission time is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimingMode {
    /// A full 80-column line per line break, whatever the line holds.
    #[default]
    #[serde(rename = "line")]
    PerLine,
    /// One byte per scanned unit; a whole control sequence counts once.
    #[serde(rename = "simulated")]
    PerCharacter,
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingMode::PerLine => write!(f, "line"),
            TimingMode::PerCharacter => write!(f, "simulated"),
        }
    }
}

/// Requested delivery speed for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Deliver as fast as the source can be read.
    Unthrottled,
    /// Emulate a modem at `bitrate` bits per second.
    Throttled {
        bitrate: NonZeroU32,
        mode: TimingMode,
    },
}

impl Pacing {
    /// Build a pacing from a raw bitrate, where 0 means unthrottled.
    pub fn new(bitrate: u32, mode: TimingMode) -> Self {
        match NonZeroU32::new(bitrate) {
            Some(bitrate) => Pacing::Throttled { bitrate, mode },
            None => Pacing::Unthrottled,
        }
    }

    /// Build a throttled pacing, rejecting a zero bitrate.
    pub fn throttled(bitrate: u32, mode: TimingMode) -> Result<Self, RenderError> {
        NonZeroU32::new(bitrate)
            .map(|bitrate| Pacing::Throttled { bitrate, mode })
            .ok_or_else(|| RenderError::InvalidRate {
                value: bitrate.to_string(),
            })
    }

    /// Parse a decimal bitrate for a throttled mode.
    pub fn parse_throttled(value: &str, mode: TimingMode) -> Result<Self, RenderError> {
        let invalid = || RenderError::InvalidRate {
            value: value.to_string(),
        };
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let bitrate: u32 = value.parse().map_err(|_| invalid())?;
        Self::throttled(bitrate, mode).map_err(|_| invalid())
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self, Pacing::Throttled { .. })
    }
}

impl fmt::Display for Pacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pacing::Unthrottled => write!(f, "quick"),
            Pacing::Throttled { bitrate, mode } => write!(f, "{} bps ({})", bitrate, mode),
        }
    }
}

fn line_bits() -> u64 {
    COLUMNS as u64 * BITS_PER_BYTE
}

fn bits_to_duration(bits: u64, bitrate: NonZeroU32) -> Duration {
    let nanos = u128::from(bits) * NANOS_PER_SEC / u128::from(bitrate.get());
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Per-render delivery schedule.
///
/// Owned by exactly one render; never shared between transfers.
#[derive(Debug)]
pub struct Pacer<C = SystemClock> {
    clock: C,
    pacing: Pacing,
    start: Instant,
    charged_bits: u64,
    next_deadline: Instant,
}

impl<C: Clock> Pacer<C> {
    pub fn new(pacing: Pacing, clock: C) -> Self {
        let start = clock.now();
        Self {
            clock,
            pacing,
            start,
            charged_bits: 0,
            next_deadline: start,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Absolute time the next flushed chunk is due.
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Charge one scanned unit (per-character mode only).
    pub fn on_unit(&mut self) {
        if let Pacing::Throttled {
            mode: TimingMode::PerCharacter,
            ..
        } = self.pacing
        {
            self.charge(BITS_PER_BYTE);
        }
    }

    /// Charge one completed line (per-line mode only).
    pub fn on_line(&mut self) {
        if let Pacing::Throttled {
            mode: TimingMode::PerLine,
            ..
        } = self.pacing
        {
            self.charge(line_bits());
        }
    }

    /// How long the caller must wait before the next chunk is visible.
    ///
    /// Zero once the deadline has passed, and always zero when unthrottled.
    /// Not clamped above.
    pub fn wait(&self) -> Duration {
        if !self.pacing.is_throttled() {
            return Duration::ZERO;
        }
        self.next_deadline
            .saturating_duration_since(self.clock.now())
    }

    fn charge(&mut self, bits: u64) {
        let Pacing::Throttled { bitrate, .. } = self.pacing else {
            return;
        };
        self.charged_bits = self.charged_bits.saturating_add(bits);
        self.next_deadline = self.start + bits_to_duration(self.charged_bits, bitrate);
    }
}

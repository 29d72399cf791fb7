//! Digital output line driving one relay coil.
//!
//! Wraps any [`embedded_hal::digital::OutputPin`] together with the GPIO
//! number it was opened on and the last level that was confirmed written.
//!
//! ## Retry contract
//!
//! A failed write is retried once, immediately.  If the retry fails too the
//! write is abandoned and reported; the caller decides whether the sequence
//! continues.  No write is retried more than once.

use core::fmt;

use embedded_hal::digital::{Error as _, ErrorKind, OutputPin, PinState};
use log::warn;

/// Result of a write that reached the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// First attempt succeeded.
    Written,
    /// First attempt failed, the single retry succeeded.
    Retried,
}

/// A write that failed twice and was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub gpio: u8,
    pub level: PinState,
    pub kind: ErrorKind,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GPIO {} write {} failed: {:?}",
            self.gpio,
            level_bit(self.level),
            self.kind
        )
    }
}

impl std::error::Error for LineError {}

/// `0` or `1`, the way relay boards are labelled.
pub fn level_bit(level: PinState) -> u8 {
    match level {
        PinState::Low => 0,
        PinState::High => 1,
    }
}

pub struct OutputLine<P> {
    gpio: u8,
    pin: P,
    level: PinState,
}

impl<P: OutputPin> OutputLine<P> {
    /// Take ownership of an opened pin.  Lines are assumed to start low.
    pub fn new(gpio: u8, pin: P) -> Self {
        Self {
            gpio,
            pin,
            level: PinState::Low,
        }
    }

    /// Drive the pin to `level`, retrying once on failure.
    pub fn set_level(&mut self, level: PinState) -> Result<WriteOutcome, LineError> {
        let outcome = match self.pin.set_state(level) {
            Ok(()) => WriteOutcome::Written,
            Err(first) => {
                warn!(
                    "GPIO {}: write {} failed ({:?}), retrying",
                    self.gpio,
                    level_bit(level),
                    first.kind()
                );
                self.pin.set_state(level).map_err(|e| LineError {
                    gpio: self.gpio,
                    level,
                    kind: e.kind(),
                })?;
                WriteOutcome::Retried
            }
        };
        self.level = level;
        Ok(outcome)
    }

    /// Last level confirmed written.
    pub fn level(&self) -> PinState {
        self.level
    }

    pub fn is_set_high(&self) -> bool {
        self.level == PinState::High
    }
}

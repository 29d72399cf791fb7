//! Unified error types for relaypulse.
//!
//! Construction-time failures funnel into [`Error`].  Line write failures
//! during an autonomous sequence never reach a caller; they surface as
//! [`LineError`](crate::drivers::output_line::LineError) through the
//! event sink instead.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible construction step funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An output line could not be opened or the worker could not start.
    Init(InitError),
    /// The device record is malformed or violates an invariant.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// A device cannot be registered as usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The GPIO controller itself could not be opened.
    GpioUnavailable,
    /// The pin does not exist or could not be configured as an output.
    PinUnavailable(u8),
    /// The pin is already claimed by another line.
    PinBusy(u8),
    /// The sequencer worker thread could not be spawned.
    WorkerSpawn,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioUnavailable => write!(f, "GPIO controller unavailable"),
            Self::PinUnavailable(pin) => write!(f, "GPIO {pin} unavailable as output"),
            Self::PinBusy(pin) => write!(f, "GPIO {pin} already claimed"),
            Self::WorkerSpawn => write!(f, "sequencer worker spawn failed"),
        }
    }
}

impl std::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The record could not be parsed.
    Malformed(String),
    /// Both relays are configured on the same GPIO.
    DuplicateLine(u8),
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed device record: {msg}"),
            Self::DuplicateLine(pin) => write!(f, "gpioA and gpioB are both {pin}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

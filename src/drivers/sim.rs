//! In-memory GPIO for host builds and bench runs without relay hardware.
//!
//! Pins are infallible and remember their level so the bench host (or a
//! test) can read it back through a [`SimProbe`].

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin};
use log::trace;

use crate::app::ports::GpioPort;
use crate::error::InitError;

/// Simulated output pin.
pub struct SimPin {
    gpio: u8,
    high: Arc<AtomicBool>,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        trace!("sim GPIO {} -> 0", self.gpio);
        self.high.store(false, Ordering::Release);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        trace!("sim GPIO {} -> 1", self.gpio);
        self.high.store(true, Ordering::Release);
        Ok(())
    }
}

/// Read-only view of a simulated pin's level.
#[derive(Clone)]
pub struct SimProbe {
    high: Arc<AtomicBool>,
}

impl SimProbe {
    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::Acquire)
    }
}

/// Hands out [`SimPin`]s, refusing pins that are claimed or marked
/// unavailable.
#[derive(Default)]
pub struct SimGpio {
    claimed: BTreeSet<u8>,
    unavailable: BTreeSet<u8>,
}

impl SimGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `gpio` fail to open, as a missing or reserved pin would.
    pub fn mark_unavailable(&mut self, gpio: u8) {
        self.unavailable.insert(gpio);
    }

    /// Open a pin and also return a probe onto its level.
    pub fn open_with_probe(&mut self, gpio: u8) -> Result<(SimPin, SimProbe), InitError> {
        if self.unavailable.contains(&gpio) {
            return Err(InitError::PinUnavailable(gpio));
        }
        if !self.claimed.insert(gpio) {
            return Err(InitError::PinBusy(gpio));
        }
        let high = Arc::new(AtomicBool::new(false));
        let probe = SimProbe { high: high.clone() };
        Ok((SimPin { gpio, high }, probe))
    }
}

impl GpioPort for SimGpio {
    type Pin = SimPin;

    fn open_output(&mut self, gpio: u8) -> Result<SimPin, InitError> {
        self.open_with_probe(gpio).map(|(pin, _)| pin)
    }
}

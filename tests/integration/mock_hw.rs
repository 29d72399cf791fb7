//! Mock hardware adapters for integration tests.
//!
//! Records every pin write with a timestamp so tests can assert on the full
//! relay timeline without touching real GPIO.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use relaypulse::app::events::SequencerEvent;
use relaypulse::app::ports::{EventSink, GpioPort};
use relaypulse::error::InitError;

// ── Pin write record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinWrite {
    pub gpio: u8,
    pub high: bool,
    pub at: Instant,
}

/// How a mock pin misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail this many write attempts, then behave.
    FailNext(u32),
    /// Every write fails.
    Always,
}

#[derive(Debug)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

type WriteLog = Arc<Mutex<Vec<PinWrite>>>;

// ── RecordingPin ─────────────────────────────────────────────

pub struct RecordingPin {
    gpio: u8,
    fault: Option<Fault>,
    log: WriteLog,
}

impl RecordingPin {
    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        match self.fault {
            Some(Fault::Always) => return Err(MockPinError),
            Some(Fault::FailNext(n)) if n > 0 => {
                self.fault = Some(Fault::FailNext(n - 1));
                return Err(MockPinError);
            }
            _ => {}
        }
        self.log.lock().unwrap().push(PinWrite {
            gpio: self.gpio,
            high,
            at: Instant::now(),
        });
        Ok(())
    }
}

impl ErrorType for RecordingPin {
    type Error = MockPinError;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), MockPinError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), MockPinError> {
        self.write(true)
    }
}

// ── RecordingGpio ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingGpio {
    log: WriteLog,
    faults: HashMap<u8, Fault>,
    unavailable: Vec<u8>,
}

#[allow(dead_code)]
impl RecordingGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(mut self, gpio: u8, fault: Fault) -> Self {
        self.faults.insert(gpio, fault);
        self
    }

    pub fn with_unavailable(mut self, gpio: u8) -> Self {
        self.unavailable.push(gpio);
        self
    }

    /// Shared view of the write log; stays valid after the pins are dropped.
    pub fn writes(&self) -> Writes {
        Writes(self.log.clone())
    }
}

impl GpioPort for RecordingGpio {
    type Pin = RecordingPin;

    fn open_output(&mut self, gpio: u8) -> Result<RecordingPin, InitError> {
        if self.unavailable.contains(&gpio) {
            return Err(InitError::PinUnavailable(gpio));
        }
        Ok(RecordingPin {
            gpio,
            fault: self.faults.get(&gpio).copied(),
            log: self.log.clone(),
        })
    }
}

#[derive(Clone)]
pub struct Writes(WriteLog);

#[allow(dead_code)]
impl Writes {
    pub fn snapshot(&self) -> Vec<PinWrite> {
        self.0.lock().unwrap().clone()
    }

    /// `(gpio, high)` pairs in write order.
    pub fn levels(&self) -> Vec<(u8, bool)> {
        self.snapshot().iter().map(|w| (w.gpio, w.high)).collect()
    }

    /// Poll until at least `n` writes are recorded or `timeout` passes.
    pub fn wait_for(&self, n: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.0.lock().unwrap().len() >= n {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<SequencerEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<SequencerEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SequencerEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

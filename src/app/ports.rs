//! Port traits: the boundary between the sequencer and its collaborators.
//!
//! ```text
//!   SwitchPort ──▶ SequencerHandle ──▶ ActuatorSequencer ──▶ OutputLine
//!                                           │
//!                        StateObserver ◀────┴────▶ EventSink
//! ```
//!
//! The core never touches a GPIO controller, a logger, or the accessory
//! host directly; adapters implement these traits.

use embedded_hal::digital::OutputPin;

use crate::error::InitError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: construction-time pin claiming)
// ───────────────────────────────────────────────────────────────

/// Opens physical pins as outputs.
pub trait GpioPort {
    type Pin: OutputPin;

    /// Claim `gpio` as an output driven low.
    ///
    /// Failure is fatal for the device: it must not be registered.
    fn open_output(&mut self, gpio: u8) -> Result<Self::Pin, InitError>;
}

// ───────────────────────────────────────────────────────────────
// State observer (driven adapter: core → accessory host)
// ───────────────────────────────────────────────────────────────

/// Receives the autonomous `Active → Idle` transition.
///
/// Called from the sequencer worker thread, outside the sequencer lock.
/// Implementations should hand the value off and return.
pub trait StateObserver {
    fn notify_state_changed(&mut self, is_active: bool);
}

impl<F: FnMut(bool)> StateObserver for F {
    fn notify_state_changed(&mut self, is_active: bool) {
        self(is_active);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: core → logging / alerting)
// ───────────────────────────────────────────────────────────────

/// Diagnostic side channel.  Line write failures during the autonomous
/// phase have no caller left to report to; they arrive here.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::SequencerEvent);
}

// ───────────────────────────────────────────────────────────────
// Switch port (driving adapter: accessory host → core)
// ───────────────────────────────────────────────────────────────

/// The on/off characteristic as the accessory host sees it.
///
/// Both calls return immediately; returning from `set_on` is the
/// acknowledgment.
pub trait SwitchPort {
    /// `true` starts the pulse sequence; `false` is acknowledged and
    /// otherwise ignored, since de-energising is always autonomous.
    fn set_on(&self, value: bool);

    /// Current logical state.
    fn get_on(&self) -> bool;
}

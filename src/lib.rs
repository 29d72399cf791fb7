//! relaypulse library.
//!
//! Drives a two-relay opener with a fixed timed pulse sequence and reports
//! a derived on/off state.  Everything hardware-specific sits behind the
//! `rpi` feature; host builds run against simulated lines.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod runtime;
pub mod scheduler;
pub mod sequence;

mod pins;

pub use adapters::switch::SwitchAccessory;
pub use app::ports::{EventSink, GpioPort, StateObserver, SwitchPort};
pub use app::sequencer::{ActuatorSequencer, TriggerOutcome};
pub use config::DeviceConfig;
pub use error::{Error, Result};
pub use runtime::SequencerHandle;

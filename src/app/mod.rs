//! Application core: the pulse state machine and its port traits.
//!
//! All interaction with pins, loggers and the accessory host happens
//! through the traits in [`ports`], keeping [`sequencer`] testable without
//! real relays or a running clock.

pub mod events;
pub mod ports;
pub mod sequencer;

//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements     | Connects to                 |
//! |------------|----------------|-----------------------------|
//! | `log_sink` | EventSink      | `log` facade                |
//! |            | StateObserver  | `log` facade                |
//! | `switch`   | SwitchPort     | accessory host (Set / Get)  |
//!
//! GPIO backends implementing `GpioPort` live in [`crate::drivers`].

pub mod log_sink;
pub mod switch;

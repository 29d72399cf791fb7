//! Output line driver and the GPIO backends that open lines.

pub mod output_line;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;

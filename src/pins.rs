//! Bench wiring for the two-relay board.
//!
//! Only used when the host supplies no device record.  Numbers are BCM
//! GPIO numbers on the Raspberry Pi header.

/// Relay A (IN1): momentary pulse that starts door motion.
pub const BENCH_RELAY_A_GPIO: u8 = 17;
/// Relay B (IN2): second momentary pulse fired after relay A releases.
pub const BENCH_RELAY_B_GPIO: u8 = 27;

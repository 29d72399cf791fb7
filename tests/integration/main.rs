//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the running sequencer
//! against mock adapters.  All tests run on the host with real time and
//! no relay hardware.

mod mock_hw;
mod switch_tests;

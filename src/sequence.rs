//! The pulse plan: which line changes, and when, after one trigger.
//!
//! ```text
//!  t(ms)   0     300    500    800    1000
//!  A       ▔▔▔▔▔▔▔╲_____________________
//!  B       ______________╱▔▔▔▔▔▔╲_______
//!  active  ▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔╲___
//! ```
//!
//! Line A is asserted synchronously by the trigger itself; the plan holds
//! the four steps that follow it.

use core::fmt;
use std::time::Duration;

use embedded_hal::digital::PinState;

use crate::config::PulseTiming;
use crate::drivers::output_line::level_bit;

/// What a scheduled step does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    SetLineA(PinState),
    SetLineB(PinState),
    /// Clear the logical state and notify the observer.
    Reset,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetLineA(level) => write!(f, "A->{}", level_bit(*level)),
            Self::SetLineB(level) => write!(f, "B->{}", level_bit(*level)),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// One step, offset from the trigger instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseStep {
    pub offset: Duration,
    pub action: StepAction,
}

/// Number of scheduled steps per trigger.
pub const STEP_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulsePlan {
    steps: [PulseStep; STEP_COUNT],
}

impl PulsePlan {
    /// Build the plan from (validated) timing.
    pub fn from_timing(timing: &PulseTiming) -> Self {
        Self {
            steps: [
                PulseStep {
                    offset: timing.line_a_release(),
                    action: StepAction::SetLineA(PinState::Low),
                },
                PulseStep {
                    offset: timing.line_b_assert(),
                    action: StepAction::SetLineB(PinState::High),
                },
                PulseStep {
                    offset: timing.line_b_release(),
                    action: StepAction::SetLineB(PinState::Low),
                },
                PulseStep {
                    offset: timing.reset(),
                    action: StepAction::Reset,
                },
            ],
        }
    }

    pub fn steps(&self) -> &[PulseStep] {
        &self.steps
    }
}

impl Default for PulsePlan {
    fn default() -> Self {
        Self::from_timing(&PulseTiming::default())
    }
}

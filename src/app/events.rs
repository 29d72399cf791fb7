//! Outbound sequencer events.
//!
//! The sequencer emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them, typically logging.

use crate::drivers::output_line::LineError;
use crate::sequence::StepAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A sequence started; line A is asserted.
    Triggered,

    /// A trigger arrived while a sequence was still running and was dropped.
    TriggerIgnored,

    /// A step wrote its line on the first attempt.
    StepApplied(StepAction),

    /// A step wrote its line after one failed attempt.
    StepRetried(StepAction),

    /// A step's write failed twice and was abandoned.
    StepFailed { action: StepAction, error: LineError },

    /// The logical state returned to inactive.
    Reset,

    /// Shutdown cancelled this many outstanding steps.
    Cancelled(usize),
}

//! Actuator sequencer: the pulse state machine.
//!
//! [`ActuatorSequencer`] owns both output lines, the logical `is_active`
//! flag and the queue of scheduled steps.  Time is passed in by the
//! caller, so the core is deterministic; the threaded driver lives in
//! [`runtime`](crate::runtime).
//!
//! ```text
//!              trigger()  (A->1, schedule 4 steps)
//!   ┌──────┐ ───────────────────────────────────▶ ┌────────┐
//!   │ Idle │                                      │ Active │ ◀─┐ trigger():
//!   └──────┘ ◀─────────────────────────────────── └────────┘ ──┘ ignored
//!              reset step at T0+1000 (notify)
//! ```
//!
//! A trigger that arrives while a sequence is running is ignored: it never
//! reschedules, so no stale step can race a fresh one.

use std::time::Instant;

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;
use log::{error, info};

use crate::config::DeviceConfig;
use crate::drivers::output_line::{OutputLine, WriteOutcome};
use crate::error::Error;
use crate::scheduler::{TimerHandle, TimerQueue};
use crate::sequence::{PulsePlan, STEP_COUNT, StepAction};

use super::events::SequencerEvent;
use super::ports::{EventSink, GpioPort};

/// Result of a trigger request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Line A asserted and the remaining steps scheduled.
    Started,
    /// A sequence was already running; nothing changed.
    IgnoredWhileActive,
}

/// Result of servicing due steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOutcome {
    /// `Some(false)` when the reset step ran; forward it to the observer.
    pub state_changed: Option<bool>,
    /// When the next step is due, if any.
    pub next_deadline: Option<Instant>,
}

pub struct ActuatorSequencer<P> {
    name: String,
    line_a: OutputLine<P>,
    line_b: OutputLine<P>,
    plan: PulsePlan,
    is_active: bool,
    timers: TimerQueue<StepAction, STEP_COUNT>,
    /// Handles of steps scheduled by the running sequence.
    pending: Vec<TimerHandle, STEP_COUNT>,
}

impl<P: OutputPin> ActuatorSequencer<P> {
    /// Validate the record and claim both lines.
    ///
    /// Any failure here means the device must not be registered.
    pub fn open(config: &DeviceConfig, gpio: &mut impl GpioPort<Pin = P>) -> Result<Self, Error> {
        config.validate()?;
        let line_a = OutputLine::new(config.gpio_a, gpio.open_output(config.gpio_a)?);
        let line_b = OutputLine::new(config.gpio_b, gpio.open_output(config.gpio_b)?);
        info!(
            "{}: relay A on GPIO {}, relay B on GPIO {}",
            config.name, config.gpio_a, config.gpio_b
        );
        Ok(Self::new(
            config.name.clone(),
            line_a,
            line_b,
            PulsePlan::from_timing(&config.timing),
        ))
    }

    /// Build from lines that are already open.  Starts `Idle`.
    pub fn new(
        name: impl Into<String>,
        line_a: OutputLine<P>,
        line_b: OutputLine<P>,
        plan: PulsePlan,
    ) -> Self {
        Self {
            name: name.into(),
            line_a,
            line_b,
            plan,
            is_active: false,
            timers: TimerQueue::new(),
            pending: Vec::new(),
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Start a sequence at `now`, or ignore the request if one is running.
    pub fn trigger(&mut self, now: Instant, sink: &mut dyn EventSink) -> TriggerOutcome {
        if self.is_active {
            sink.emit(&SequencerEvent::TriggerIgnored);
            return TriggerOutcome::IgnoredWhileActive;
        }

        self.is_active = true;
        sink.emit(&SequencerEvent::Triggered);

        // A failed assert is reported but does not stop the schedule: the
        // reset step must still run or the state would stick at active.
        self.apply(StepAction::SetLineA(PinState::High), sink);

        let plan = self.plan;
        for step in plan.steps() {
            let scheduled = self
                .timers
                .schedule(now + step.offset, step.action)
                .and_then(|h| {
                    self.pending
                        .push(h)
                        .map_err(|_| crate::scheduler::QueueFull)
                });
            if scheduled.is_err() {
                error!("{}: no timer slot for step {}", self.name, step.action);
            }
        }
        TriggerOutcome::Started
    }

    /// Run every step due at `now`, oldest deadline first.
    pub fn service(&mut self, now: Instant, sink: &mut dyn EventSink) -> ServiceOutcome {
        let mut state_changed = None;
        while let Some((handle, action)) = self.timers.pop_due(now) {
            self.pending.retain(|h| *h != handle);
            self.apply(action, sink);
            if action == StepAction::Reset {
                state_changed = Some(false);
            }
        }
        ServiceOutcome {
            state_changed,
            next_deadline: self.timers.next_deadline(),
        }
    }

    /// Cancel outstanding steps and leave both relays de-energised.
    ///
    /// Must run before the lines are released.  Returns how many steps
    /// were cancelled.
    pub fn shutdown(&mut self, sink: &mut dyn EventSink) -> usize {
        let mut cancelled = 0;
        for handle in self.pending.iter() {
            if self.timers.cancel(*handle) {
                cancelled += 1;
            }
        }
        self.pending.clear();

        if self.line_a.is_set_high() {
            self.apply(StepAction::SetLineA(PinState::Low), sink);
        }
        if self.line_b.is_set_high() {
            self.apply(StepAction::SetLineB(PinState::Low), sink);
        }
        self.is_active = false;

        sink.emit(&SequencerEvent::Cancelled(cancelled));
        cancelled
    }

    // ── Queries ───────────────────────────────────────────────

    /// Logical on/off state.  Never blocks, no side effects.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last confirmed levels of lines A and B.
    pub fn line_levels(&self) -> (PinState, PinState) {
        (self.line_a.level(), self.line_b.level())
    }

    /// Steps scheduled but not yet fired.
    pub fn pending_steps(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(&mut self, action: StepAction, sink: &mut dyn EventSink) {
        let result = match action {
            StepAction::SetLineA(level) => self.line_a.set_level(level),
            StepAction::SetLineB(level) => self.line_b.set_level(level),
            StepAction::Reset => {
                self.is_active = false;
                sink.emit(&SequencerEvent::Reset);
                return;
            }
        };

        match result {
            Ok(WriteOutcome::Written) => sink.emit(&SequencerEvent::StepApplied(action)),
            Ok(WriteOutcome::Retried) => sink.emit(&SequencerEvent::StepRetried(action)),
            Err(error) => sink.emit(&SequencerEvent::StepFailed { action, error }),
        }
    }
}

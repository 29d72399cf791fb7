//! Log-based event sink and state observer.
//!
//! Implements [`EventSink`] by writing sequencer events to the `log`
//! facade (stderr through the bench binary's subscriber).  An alerting
//! adapter would implement the same trait.

use log::{error, info, warn};

use crate::app::events::SequencerEvent;
use crate::app::ports::{EventSink, StateObserver};

/// Adapter that logs every [`SequencerEvent`] for one device.
pub struct LogEventSink {
    device: String,
}

impl LogEventSink {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SequencerEvent) {
        match event {
            SequencerEvent::Triggered => info!("SEQ | {} | started", self.device),
            SequencerEvent::TriggerIgnored => {
                info!("SEQ | {} | trigger ignored (active)", self.device);
            }
            SequencerEvent::StepApplied(action) => info!("STEP | {} | {}", self.device, action),
            SequencerEvent::StepRetried(action) => {
                warn!("STEP | {} | {} (after retry)", self.device, action);
            }
            SequencerEvent::StepFailed { action, error } => {
                error!("FAULT | {} | {} abandoned: {}", self.device, action, error);
            }
            SequencerEvent::Reset => info!("SEQ | {} | reset", self.device),
            SequencerEvent::Cancelled(n) => {
                info!("SEQ | {} | shutdown, {} step(s) cancelled", self.device, n);
            }
        }
    }
}

/// Observer that only logs the state change.
pub struct LogStateObserver {
    device: String,
}

impl LogStateObserver {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

impl StateObserver for LogStateObserver {
    fn notify_state_changed(&mut self, is_active: bool) {
        info!(
            "STATE | {} | on={}",
            self.device,
            if is_active { "true" } else { "false" }
        );
    }
}

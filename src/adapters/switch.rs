//! Switch accessory: what the accessory host registers for a device.
//!
//! Wraps a running [`SequencerHandle`] behind [`SwitchPort`] and carries
//! the static accessory information.  `set_on` acknowledges by returning;
//! neither call waits on the pulse sequence.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::{EventSink, GpioPort, StateObserver, SwitchPort};
use crate::app::sequencer::{ActuatorSequencer, TriggerOutcome};
use crate::config::{AccessoryInfo, DeviceConfig};
use crate::error::Error;
use crate::runtime::SequencerHandle;

pub struct SwitchAccessory<P: OutputPin> {
    name: String,
    info: AccessoryInfo,
    sequencer: SequencerHandle<P>,
}

impl<P: OutputPin + Send + 'static> SwitchAccessory<P> {
    /// Claim the lines, start the worker and return a usable accessory.
    ///
    /// An error means the device must not be registered with the host.
    pub fn register(
        config: &DeviceConfig,
        gpio: &mut impl GpioPort<Pin = P>,
        observer: impl StateObserver + Send + 'static,
        sink: impl EventSink + Send + 'static,
    ) -> Result<Self, Error> {
        let sequencer = ActuatorSequencer::open(config, gpio)?;
        let sequencer = SequencerHandle::spawn(sequencer, observer, sink)?;
        Ok(Self::new(config, sequencer))
    }
}

impl<P: OutputPin> SwitchAccessory<P> {
    pub fn new(config: &DeviceConfig, sequencer: SequencerHandle<P>) -> Self {
        Self {
            name: config.name.clone(),
            info: config.info.clone(),
            sequencer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> &AccessoryInfo {
        &self.info
    }

    /// Unregister: cancel pending steps and release the relays.
    pub fn shutdown(self) {
        self.sequencer.shutdown();
    }
}

impl<P: OutputPin> SwitchPort for SwitchAccessory<P> {
    fn set_on(&self, value: bool) {
        debug!("{}: Set On -> {}", self.name, value);
        if value && self.sequencer.trigger() == TriggerOutcome::IgnoredWhileActive {
            debug!("{}: already pulsing", self.name);
        }
    }

    fn get_on(&self) -> bool {
        let on = self.sequencer.query_state();
        debug!("{}: Get On -> {}", self.name, on);
        on
    }
}

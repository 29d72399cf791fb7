//! Raspberry Pi GPIO through `rppal`.
//!
//! Pins are claimed as outputs driven low.  The sequencer drives both
//! lines low again on shutdown, before they are released.

use log::{error, info};
use rppal::gpio::{Gpio, OutputPin};

use crate::app::ports::GpioPort;
use crate::error::InitError;

pub struct RppalGpio {
    gpio: Gpio,
}

impl RppalGpio {
    pub fn new() -> Result<Self, InitError> {
        let gpio = Gpio::new().map_err(|e| {
            error!("GPIO controller open failed: {}", e);
            InitError::GpioUnavailable
        })?;
        Ok(Self { gpio })
    }
}

impl GpioPort for RppalGpio {
    type Pin = OutputPin;

    fn open_output(&mut self, pin: u8) -> Result<OutputPin, InitError> {
        let out = self
            .gpio
            .get(pin)
            .map_err(|e| {
                error!("GPIO {} open failed: {}", pin, e);
                match e {
                    rppal::gpio::Error::PinUsed(_) => InitError::PinBusy(pin),
                    _ => InitError::PinUnavailable(pin),
                }
            })?
            .into_output_low();
        info!("GPIO {} claimed as output", pin);
        Ok(out)
    }
}

//! Device record and pulse timing.
//!
//! The accessory host hands each device a record with `name`, `gpioA` and
//! `gpioB`.  Timing and accessory information are optional and default to
//! the standard opener sequence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// One actuator as configured by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Display name shown by the host.
    pub name: String,
    /// GPIO driving relay A (the first pulse).
    pub gpio_a: u8,
    /// GPIO driving relay B (the second pulse).
    pub gpio_b: u8,
    #[serde(default)]
    pub timing: PulseTiming,
    #[serde(default)]
    pub info: AccessoryInfo,
}

/// Offsets of the scheduled steps, in milliseconds after the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PulseTiming {
    /// Relay A released.
    pub line_a_release_ms: u32,
    /// Relay B energised.
    pub line_b_assert_ms: u32,
    /// Relay B released.
    pub line_b_release_ms: u32,
    /// Logical state cleared and observers notified.
    pub reset_ms: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            line_a_release_ms: 300,
            line_b_assert_ms: 500,
            line_b_release_ms: 800,
            reset_ms: 1000,
        }
    }
}

impl PulseTiming {
    pub fn line_a_release(&self) -> Duration {
        Duration::from_millis(u64::from(self.line_a_release_ms))
    }

    pub fn line_b_assert(&self) -> Duration {
        Duration::from_millis(u64::from(self.line_b_assert_ms))
    }

    pub fn line_b_release(&self) -> Duration {
        Duration::from_millis(u64::from(self.line_b_release_ms))
    }

    pub fn reset(&self) -> Duration {
        Duration::from_millis(u64::from(self.reset_ms))
    }

    /// Steps must be strictly ordered so the relays never overlap, and the
    /// reset may not come before the last line write.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_a_release_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "lineAReleaseMs must be greater than zero",
            ));
        }
        if self.line_b_assert_ms <= self.line_a_release_ms {
            return Err(ConfigError::ValidationFailed(
                "lineBAssertMs must come after lineAReleaseMs",
            ));
        }
        if self.line_b_release_ms <= self.line_b_assert_ms {
            return Err(ConfigError::ValidationFailed(
                "lineBReleaseMs must come after lineBAssertMs",
            ));
        }
        if self.reset_ms < self.line_b_release_ms {
            return Err(ConfigError::ValidationFailed(
                "resetMs must not precede lineBReleaseMs",
            ));
        }
        Ok(())
    }
}

/// Static accessory information published alongside the switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessoryInfo {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl Default for AccessoryInfo {
    fn default() -> Self {
        Self {
            manufacturer: "Default-Manufacturer".into(),
            model: "Default-Model".into(),
            serial_number: "Default-Serial".into(),
        }
    }
}

impl DeviceConfig {
    /// Record with default timing and information.
    pub fn new(name: impl Into<String>, gpio_a: u8, gpio_b: u8) -> Self {
        Self {
            name: name.into(),
            gpio_a,
            gpio_b,
            timing: PulseTiming::default(),
            info: AccessoryInfo::default(),
        }
    }

    /// Bench wiring used when no record is supplied.
    pub fn bench() -> Self {
        Self::new("Garage Door", pins::BENCH_RELAY_A_GPIO, pins::BENCH_RELAY_B_GPIO)
    }

    /// Parse and validate a JSON device record.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("name must not be empty"));
        }
        if self.gpio_a == self.gpio_b {
            return Err(ConfigError::DuplicateLine(self.gpio_a));
        }
        self.timing.validate()
    }
}

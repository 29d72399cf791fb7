//! relaypulse bench host.
//!
//! Stands in for the accessory host: registers one device and turns stdin
//! lines into Set / Get requests.
//!
//! ```text
//!   stdin ──▶ on / off / get / quit ──▶ SwitchAccessory ──▶ sequencer worker
//!                                                              │
//!                                        relays (rppal | sim) ◀┘
//! ```
//!
//! Usage: `relaypulse [device.json]`, log level from `RUST_LOG`.

use std::io::{self, BufRead};
use std::{env, fs};

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use relaypulse::adapters::log_sink::{LogEventSink, LogStateObserver};
use relaypulse::{DeviceConfig, SwitchAccessory, SwitchPort};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!("relaypulse v{}", env!("CARGO_PKG_VERSION"));

    let config = match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading device record {path}"))?;
            DeviceConfig::from_json(&json).with_context(|| format!("loading {path}"))?
        }
        None => {
            warn!("No device record given, using bench wiring");
            DeviceConfig::bench()
        }
    };

    let mut gpio = open_gpio()?;
    let accessory = SwitchAccessory::register(
        &config,
        &mut gpio,
        LogStateObserver::new(&config.name),
        LogEventSink::new(&config.name),
    )
    .with_context(|| format!("registering '{}'", config.name))?;

    info!(
        "'{}' ready ({} {} {}); commands: on, off, get, quit",
        accessory.name(),
        accessory.info().manufacturer,
        accessory.info().model,
        accessory.info().serial_number
    );

    for line in io::stdin().lock().lines() {
        match line?.trim() {
            "on" => accessory.set_on(true),
            "off" => accessory.set_on(false),
            "get" => println!("{}", accessory.get_on()),
            "quit" | "exit" => break,
            "" => {}
            other => warn!("Unknown command '{}'", other),
        }
    }

    accessory.shutdown();
    info!("Bye");
    Ok(())
}

#[cfg(feature = "rpi")]
fn open_gpio() -> Result<relaypulse::drivers::rpi::RppalGpio> {
    Ok(relaypulse::drivers::rpi::RppalGpio::new()?)
}

#[cfg(not(feature = "rpi"))]
fn open_gpio() -> Result<relaypulse::drivers::sim::SimGpio> {
    info!("Built without `rpi`: relays are simulated");
    Ok(relaypulse::drivers::sim::SimGpio::new())
}

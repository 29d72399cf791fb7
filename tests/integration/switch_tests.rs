//! Integration tests: SwitchAccessory registration and Set / Get requests.

use std::sync::mpsc;
use std::thread::sleep;
use std::time::Duration;

use relaypulse::config::AccessoryInfo;
use relaypulse::error::{ConfigError, InitError};
use relaypulse::{DeviceConfig, Error, SwitchAccessory, SwitchPort};

use super::mock_hw::{RecordingGpio, RecordingPin, RecordingSink};

fn register(
    config: &DeviceConfig,
    gpio: &mut RecordingGpio,
) -> Result<SwitchAccessory<RecordingPin>, Error> {
    SwitchAccessory::register(config, gpio, |_: bool| {}, RecordingSink::new())
}

#[test]
fn registers_with_default_information() {
    let mut gpio = RecordingGpio::new();
    let acc = register(&DeviceConfig::new("Garage", 17, 27), &mut gpio).unwrap();
    assert_eq!(acc.name(), "Garage");
    assert_eq!(acc.info(), &AccessoryInfo::default());
    assert_eq!(acc.info().serial_number, "Default-Serial");
    assert!(!acc.get_on());
}

#[test]
fn exposes_information_from_record() {
    let json = r#"{
        "name": "Gate",
        "gpioA": 5,
        "gpioB": 6,
        "info": { "manufacturer": "Acme", "model": "G2", "serialNumber": "0042" }
    }"#;
    let config = DeviceConfig::from_json(json).unwrap();
    let mut gpio = RecordingGpio::new();
    let acc = register(&config, &mut gpio).unwrap();
    assert_eq!(acc.info().manufacturer, "Acme");
    assert_eq!(acc.info().model, "G2");
    assert_eq!(acc.info().serial_number, "0042");
}

#[test]
fn unavailable_pin_prevents_registration() {
    let mut gpio = RecordingGpio::new().with_unavailable(27);
    let writes = gpio.writes();
    let err = register(&DeviceConfig::new("Garage", 17, 27), &mut gpio)
        .err()
        .unwrap();
    assert_eq!(err, Error::Init(InitError::PinUnavailable(27)));
    assert!(writes.levels().is_empty());
}

#[test]
fn duplicate_lines_prevent_registration() {
    let mut gpio = RecordingGpio::new();
    let err = register(&DeviceConfig::new("Garage", 17, 17), &mut gpio)
        .err()
        .unwrap();
    assert_eq!(err, Error::Config(ConfigError::DuplicateLine(17)));
}

#[test]
fn set_off_does_nothing() {
    let mut gpio = RecordingGpio::new();
    let writes = gpio.writes();
    let acc = register(&DeviceConfig::new("Garage", 17, 27), &mut gpio).unwrap();

    acc.set_on(false);
    sleep(Duration::from_millis(50));
    assert!(!acc.get_on());
    assert!(writes.levels().is_empty());
}

#[test]
fn set_off_does_not_cut_a_running_pulse() {
    let mut gpio = RecordingGpio::new();
    let writes = gpio.writes();
    let acc = register(&DeviceConfig::new("Garage", 17, 27), &mut gpio).unwrap();

    acc.set_on(true);
    acc.set_on(false);
    assert!(acc.get_on());
    assert!(writes.wait_for(4, Duration::from_secs(3)));
    assert_eq!(
        writes.levels(),
        vec![(17, true), (17, false), (27, true), (27, false)]
    );
}

#[test]
fn get_reflects_set_then_returns_to_off() {
    let (tx, rx) = mpsc::channel();
    let mut gpio = RecordingGpio::new();
    let acc = SwitchAccessory::register(
        &DeviceConfig::new("Garage", 17, 27),
        &mut gpio,
        move |on: bool| {
            let _ = tx.send(on);
        },
        RecordingSink::new(),
    )
    .unwrap();

    acc.set_on(true);
    assert!(acc.get_on());
    assert_eq!(rx.recv_timeout(Duration::from_secs(3)), Ok(false));
    assert!(!acc.get_on());
}

#[test]
fn shutdown_releases_relays() {
    let mut gpio = RecordingGpio::new();
    let writes = gpio.writes();
    let acc = register(&DeviceConfig::new("Garage", 17, 27), &mut gpio).unwrap();

    acc.set_on(true);
    acc.shutdown();
    assert_eq!(writes.levels(), vec![(17, true), (17, false)]);
}

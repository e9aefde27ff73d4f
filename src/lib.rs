#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Controller`**: Runs the poll loop: button, sensor, mapping, PWM output
//! - **`ModeSelector`**: Toggles between the two sensors on a debounced button press
//! - **`SensorKind`**: `Photoresistor` (brightness) or `Potentiometer` (hue)
//! - **`ColorOutput`**: A master brightness duty or a 16-bit RGB triple
//! - **`Fixture`** / **`Sensors`**: Groupings of the PWM channels and analog inputs
//! - **`AnalogSensor`** / **`PwmOutput`**: Traits to implement for your hardware
//! - **`Config`**: Fixed timing constants, built and validated by `ConfigBuilder`
//!
//! Duty values are 16-bit (0-65535 full scale) throughout. `PwmOutput` channels
//! rescale them to their own resolution through `SetDutyCycle`.

// Must stay first so the other modules see the logging macros.
mod fmt;

pub mod colors;
pub mod config;
pub mod controller;
pub mod hardware;
pub mod mapper;
pub mod selector;
pub mod time;
pub mod types;

pub use palette::Srgb;

pub use colors::FULL_SCALE;
pub use config::{Config, ConfigBuilder, ConfigError};
pub use controller::Controller;
pub use hardware::{
    AnalogSensor, Channel, Fixture, PwmOutput, SensorError, SensorErrorKind, Sensors,
};
pub use selector::ModeSelector;
pub use time::{StopSignal, Ticker};
pub use types::{
    ColorOutput, ControllerError, ControllerState, STATUS_LINE_CAPACITY, SensorKind, Status,
};

//! Core types shared by the selector, mapper and controller.

use core::fmt;

use embedded_hal::{digital, pwm};
use palette::Srgb;

use crate::hardware::{Channel, SensorErrorKind};

/// Which analog sensor drives the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// Light-dependent resistor. Drives the master channel as an inverted brightness.
    Photoresistor,

    /// Potentiometer. Drives the color channels through a hue sweep.
    Potentiometer,
}

impl SensorKind {
    /// Returns the other sensor.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            SensorKind::Photoresistor => SensorKind::Potentiometer,
            SensorKind::Potentiometer => SensorKind::Photoresistor,
        }
    }

    /// Returns true for [`SensorKind::Photoresistor`].
    ///
    /// This is the level written to the mode indicator.
    #[inline]
    pub fn is_photoresistor(self) -> bool {
        self == SensorKind::Photoresistor
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Photoresistor => write!(f, "Photoresistor"),
            SensorKind::Potentiometer => write!(f, "Potentiometer"),
        }
    }
}

/// Mode-selection state owned by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    active_sensor: SensorKind,
    previous_button_level: bool,
}

impl ControllerState {
    /// Creates a state with the given sensor active and the button released.
    pub const fn new(active_sensor: SensorKind) -> Self {
        Self {
            active_sensor,
            previous_button_level: false,
        }
    }

    /// Feeds one button sample into the edge detector.
    ///
    /// Toggles the active sensor on a rising edge and returns whether it did.
    /// The previous level is always updated.
    pub fn register(&mut self, button_level: bool) -> bool {
        let rising_edge = button_level && !self.previous_button_level;
        if rising_edge {
            self.active_sensor = self.active_sensor.toggled();
        }
        self.previous_button_level = button_level;
        rising_edge
    }

    /// Returns the currently active sensor.
    #[inline]
    pub fn active_sensor(&self) -> SensorKind {
        self.active_sensor
    }

    /// Returns the button level seen by the last call to [`register`](Self::register).
    #[inline]
    pub fn previous_button_level(&self) -> bool {
        self.previous_button_level
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(SensorKind::Photoresistor)
    }
}

/// Output computed from one sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOutput {
    /// Master channel duty. The color channels are left untouched.
    Brightness(u16),

    /// Color channel duties. The master channel is driven at full scale.
    Hue(Srgb<u16>),
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorOutput {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ColorOutput::Brightness(level) => defmt::write!(f, "Brightness({=u16})", level),
            ColorOutput::Hue(color) => defmt::write!(
                f,
                "Hue({=u16}, {=u16}, {=u16})",
                color.red,
                color.green,
                color.blue
            ),
        }
    }
}

/// Result of one control-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Sensor that was read.
    pub sensor: SensorKind,

    /// Raw 16-bit sample.
    pub sample: u16,

    /// What was written to the fixture.
    pub output: ColorOutput,
}

/// Buffer size for a rendered status line. The longest is
/// `Mode: Photoresistor, Sensor: 65535`.
pub const STATUS_LINE_CAPACITY: usize = 40;

impl Status {
    /// Renders the status line into a fixed-capacity buffer.
    pub fn render(&self) -> heapless::String<STATUS_LINE_CAPACITY> {
        let mut line = heapless::String::new();
        let _ = fmt::Write::write_fmt(&mut line, format_args!("{}", self));
        line
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode: {}, Sensor: {}", self.sensor, self.sample)
    }
}

/// Hardware failures surfaced by the control loop.
///
/// None of these are retried. On a real fixture the caller treats them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Reading the mode button failed.
    Button(digital::ErrorKind),

    /// Writing the mode indicator failed.
    Indicator(digital::ErrorKind),

    /// Sampling an analog sensor failed.
    Sensor {
        /// The sensor that was being read.
        sensor: SensorKind,
        /// Error category reported by the converter.
        kind: SensorErrorKind,
    },

    /// Driving a PWM channel failed.
    Pwm {
        /// The channel that rejected the write.
        channel: Channel,
        /// Error category reported by the channel.
        kind: pwm::ErrorKind,
    },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Button(kind) => write!(f, "failed to read mode button: {:?}", kind),
            ControllerError::Indicator(kind) => {
                write!(f, "failed to write mode indicator: {:?}", kind)
            }
            ControllerError::Sensor { sensor, kind } => {
                write!(f, "failed to sample {}: {:?}", sensor, kind)
            }
            ControllerError::Pwm { channel, kind } => {
                write!(f, "failed to drive {:?} PWM channel: {:?}", channel, kind)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControllerError {}

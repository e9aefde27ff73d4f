//! Hardware capability traits and the fixture/sensor groupings built on them.
//!
//! Digital pins and blocking delays come straight from `embedded-hal`. Analog
//! inputs get their own trait because `embedded-hal` 1.0 has none, and PWM
//! channels extend [`SetDutyCycle`] with a frequency setter.

use embedded_hal::pwm::{Error as _, SetDutyCycle};

use crate::colors::FULL_SCALE;
use crate::types::{ColorOutput, ControllerError, SensorKind};

/// Analog sensor error category.
///
/// Converter errors are reduced to one of these so [`ControllerError`] stays
/// `Copy` and free of the sensor's type parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum SensorErrorKind {
    /// The conversion did not complete in time.
    Timeout,
    /// A different error occurred.
    Other,
}

/// Converter error that can report its [`SensorErrorKind`].
pub trait SensorError: core::fmt::Debug {
    fn kind(&self) -> SensorErrorKind;
}

impl SensorError for SensorErrorKind {
    #[inline]
    fn kind(&self) -> SensorErrorKind {
        *self
    }
}

impl SensorError for core::convert::Infallible {
    #[inline]
    fn kind(&self) -> SensorErrorKind {
        match *self {}
    }
}

/// Trait for abstracting an analog input.
///
/// Implement this for your ADC channel. Readings are scaled to the full 16-bit
/// range regardless of the converter's native resolution.
pub trait AnalogSensor {
    /// Error returned by the converter.
    type Error: SensorError;

    /// Takes one blocking sample in the range 0-65535.
    fn read_u16(&mut self) -> Result<u16, Self::Error>;
}

/// A PWM channel whose frequency can be set.
pub trait PwmOutput: SetDutyCycle {
    /// Sets the PWM frequency in hertz.
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;
}

/// Identifies one of the fixture's PWM channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Common anode of the RGB LED.
    Master,
    Red,
    Green,
    Blue,
}

/// Writes a 16-bit duty, scaled to the channel's own resolution.
fn write_duty<C: PwmOutput>(
    pwm: &mut C,
    channel: Channel,
    duty: u16,
) -> Result<(), ControllerError> {
    pwm.set_duty_cycle_fraction(duty, FULL_SCALE)
        .map_err(|e| ControllerError::Pwm {
            channel,
            kind: e.kind(),
        })
}

fn write_frequency<C: PwmOutput>(
    pwm: &mut C,
    channel: Channel,
    hz: u32,
) -> Result<(), ControllerError> {
    pwm.set_frequency(hz).map_err(|e| ControllerError::Pwm {
        channel,
        kind: e.kind(),
    })
}

/// The four PWM channels of the light fixture.
pub struct Fixture<M, R, G, B> {
    master: M,
    red: R,
    green: G,
    blue: B,
}

impl<M, R, G, B> Fixture<M, R, G, B>
where
    M: PwmOutput,
    R: PwmOutput,
    G: PwmOutput,
    B: PwmOutput,
{
    /// Groups the channels. No hardware is touched until [`configure`](Self::configure).
    pub fn new(master: M, red: R, green: G, blue: B) -> Self {
        Self {
            master,
            red,
            green,
            blue,
        }
    }

    /// Sets every channel to the same PWM frequency.
    pub fn configure(&mut self, hz: u32) -> Result<(), ControllerError> {
        write_frequency(&mut self.master, Channel::Master, hz)?;
        write_frequency(&mut self.red, Channel::Red, hz)?;
        write_frequency(&mut self.green, Channel::Green, hz)?;
        write_frequency(&mut self.blue, Channel::Blue, hz)
    }

    /// Drives the channels for one output.
    ///
    /// Brightness only touches the master channel, leaving the color channels
    /// at whatever they last held.
    pub fn apply(&mut self, output: &ColorOutput) -> Result<(), ControllerError> {
        match output {
            ColorOutput::Brightness(level) => write_duty(&mut self.master, Channel::Master, *level),
            ColorOutput::Hue(color) => {
                write_duty(&mut self.master, Channel::Master, FULL_SCALE)?;
                write_duty(&mut self.red, Channel::Red, color.red)?;
                write_duty(&mut self.green, Channel::Green, color.green)?;
                write_duty(&mut self.blue, Channel::Blue, color.blue)
            }
        }
    }

    /// Gives the channels back.
    pub fn release(self) -> (M, R, G, B) {
        (self.master, self.red, self.green, self.blue)
    }
}

/// The photoresistor and potentiometer inputs.
pub struct Sensors<L, P> {
    photoresistor: L,
    potentiometer: P,
}

impl<L: AnalogSensor, P: AnalogSensor> Sensors<L, P> {
    pub fn new(photoresistor: L, potentiometer: P) -> Self {
        Self {
            photoresistor,
            potentiometer,
        }
    }

    /// Samples the given sensor.
    pub fn read(&mut self, sensor: SensorKind) -> Result<u16, ControllerError> {
        let sample = match sensor {
            SensorKind::Photoresistor => self.photoresistor.read_u16().map_err(|e| e.kind()),
            SensorKind::Potentiometer => self.potentiometer.read_u16().map_err(|e| e.kind()),
        };
        sample.map_err(|kind| ControllerError::Sensor { sensor, kind })
    }

    pub fn release(self) -> (L, P) {
        (self.photoresistor, self.potentiometer)
    }
}

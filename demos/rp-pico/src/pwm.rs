//! PWM channel wrapper implementing `PwmOutput`.
//!
//! On the RP2040 frequency belongs to a slice, not a channel, and each slice
//! drives two of the fixture's pins. Slices are set up once with
//! [`SliceTiming`]; the per-channel `set_frequency` then only checks that the
//! request matches.

use core::convert::Infallible;

use embedded_hal::pwm::{self, ErrorType, SetDutyCycle};
use outdoor_light::PwmOutput;

/// Divider and wrap value that put a slice at a given frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceTiming {
    pub div_int: u8,
    pub top: u16,
}

impl SliceTiming {
    /// Picks the smallest integer divider that keeps `top` within 16 bits,
    /// maximizing duty resolution.
    pub fn for_frequency(sys_hz: u32, pwm_hz: u32) -> Self {
        let counts = sys_hz / pwm_hz.max(1);
        let div = counts.div_ceil(1 << 16).clamp(1, u32::from(u8::MAX));
        let top = (counts / div).saturating_sub(1).min(u32::from(u16::MAX));

        Self {
            div_int: div as u8,
            top: top as u16,
        }
    }
}

/// Rejected frequency change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyMismatch {
    pub configured_hz: u32,
    pub requested_hz: u32,
}

impl pwm::Error for FrequencyMismatch {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// A slice channel whose slice was configured for `frequency_hz`.
pub struct SliceChannel<C> {
    channel: C,
    frequency_hz: u32,
}

impl<C> SliceChannel<C> {
    pub fn new(channel: C, frequency_hz: u32) -> Self {
        Self {
            channel,
            frequency_hz,
        }
    }
}

impl<C> ErrorType for SliceChannel<C> {
    type Error = FrequencyMismatch;
}

impl<C: SetDutyCycle<Error = Infallible>> SetDutyCycle for SliceChannel<C> {
    fn max_duty_cycle(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.channel.set_duty_cycle(duty).map_err(|never| match never {})
    }
}

impl<C: SetDutyCycle<Error = Infallible>> PwmOutput for SliceChannel<C> {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        if hz == self.frequency_hz {
            Ok(())
        } else {
            Err(FrequencyMismatch {
                configured_hz: self.frequency_hz,
                requested_hz: hz,
            })
        }
    }
}

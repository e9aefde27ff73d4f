//! Maps raw sensor samples to fixture output.
//!
//! Everything here is pure: the same sensor and sample always produce
//! bit-identical output.

use palette::Srgb;

use crate::colors::{self, FULL_SCALE};
use crate::types::{ColorOutput, SensorKind};

/// Inverted, doubled brightness for the master channel.
///
/// Doubling amplifies changes at the dark end of the sensor range; anything at
/// or above half scale turns the light fully off.
#[inline]
pub fn brightness(sample: u16) -> u16 {
    let level = i32::from(FULL_SCALE) - i32::from(sample) * 2;
    level.clamp(0, i32::from(FULL_SCALE)) as u16
}

/// Maps a sample linearly onto the hue circle, in degrees within `[0, 360)`.
///
/// A full-scale sample lands on 360 and wraps to 0.
#[inline]
pub fn sample_to_hue(sample: u16) -> f32 {
    colors::wrap_hue(f32::from(sample) / f32::from(FULL_SCALE) * 360.0)
}

/// Converts HSV to 16-bit channel duties.
///
/// Saturation and value use the 0-255 scale.
pub fn hsv_to_rgb(hue: f32, saturation: u8, value: u8) -> Srgb<u16> {
    let color = colors::hsv(
        hue,
        f32::from(saturation) / 255.0,
        f32::from(value) / 255.0,
    );
    colors::to_duty(color)
}

/// Fully saturated color for a sample.
#[inline]
pub fn hue_color(sample: u16) -> Srgb<u16> {
    hsv_to_rgb(sample_to_hue(sample), u8::MAX, u8::MAX)
}

/// Computes the fixture output for a sample from the given sensor.
///
/// The photoresistor drives brightness and the potentiometer drives hue.
pub fn map(sensor: SensorKind, sample: u16) -> ColorOutput {
    match sensor {
        SensorKind::Photoresistor => ColorOutput::Brightness(brightness(sample)),
        SensorKind::Potentiometer => ColorOutput::Hue(hue_color(sample)),
    }
}

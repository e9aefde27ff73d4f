//! Color space conversion helpers.
//!
//! Converts HSV (Hue, Saturation, Value) to RGB through `palette` and
//! quantizes the result to 16-bit PWM duties. Hue is in degrees and wraps
//! modulo 360; saturation and value are in the 0.0-1.0 range.
//!
//! All functions return `palette::Srgb` so results can be compared against
//! or mixed with other palette colors.

use palette::{FromColor, Hsv, Srgb};

/// Full-scale duty for a 16-bit PWM channel.
pub const FULL_SCALE: u16 = u16::MAX;

/// Wraps a hue in degrees into `[0, 360)`.
///
/// Negative hues wrap from the top, so `-90.0` becomes `270.0`.
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };

    // -f32::EPSILON + 360.0 rounds back up to 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
///
/// Hues outside `[0, 360)` wrap around the wheel.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Scales a 0.0-1.0 component to a 16-bit duty, rounding to nearest.
#[inline]
pub fn component_to_duty(component: f32) -> u16 {
    let scaled = libm::roundf(component.clamp(0.0, 1.0) * f32::from(FULL_SCALE));
    scaled as u16
}

/// Quantizes a floating color to 16-bit channel duties.
#[inline]
pub fn to_duty(color: Srgb) -> Srgb<u16> {
    Srgb::new(
        component_to_duty(color.red),
        component_to_duty(color.green),
        component_to_duty(color.blue),
    )
}

//! ADC channel wrapper implementing `AnalogSensor`.

use core::cell::RefCell;

use embedded_hal_0_2::adc::OneShot;
use outdoor_light::{AnalogSensor, SensorErrorKind};
use rp_pico::hal::adc::Adc;

/// Widens a 12-bit conversion to the full 16-bit range.
///
/// The top bits are repeated into the bottom so 4095 maps to 65535.
#[inline]
pub fn widen_12_bit(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}

/// One ADC input sharing the converter with other channels.
pub struct AdcChannel<'a, P> {
    adc: &'a RefCell<Adc>,
    pin: P,
}

impl<'a, P> AdcChannel<'a, P> {
    pub fn new(adc: &'a RefCell<Adc>, pin: P) -> Self {
        Self { adc, pin }
    }
}

impl<P> AnalogSensor for AdcChannel<'_, P>
where
    Adc: OneShot<Adc, u16, P, Error = ()>,
{
    type Error = SensorErrorKind;

    fn read_u16(&mut self) -> Result<u16, Self::Error> {
        let raw: u16 = nb::block!(self.adc.borrow_mut().read(&mut self.pin))
            .map_err(|()| SensorErrorKind::Other)?;
        Ok(widen_12_bit(raw))
    }
}

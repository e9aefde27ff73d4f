//! Debounced mode selection.
//!
//! Provides [`ModeSelector`], which owns the mode button and the indicator LED
//! and toggles the active sensor on each press. A press is a rising edge of
//! the logical button level; pull-up wiring is inverted here so callers never
//! see raw pin levels.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};

use crate::config::Config;
use crate::types::{ControllerError, ControllerState, SensorKind};

/// Toggles the active sensor from a push button and mirrors it on an indicator.
///
/// The indicator is driven high while the photoresistor is active.
pub struct ModeSelector<B, I> {
    button: B,
    indicator: I,
    state: ControllerState,
    indicator_synced: bool,
    debounce_ms: u32,
    active_low: bool,
}

impl<B: InputPin, I: OutputPin> ModeSelector<B, I> {
    /// Creates a selector in the configured initial mode.
    ///
    /// The indicator is written by [`sync_indicator`](Self::sync_indicator)
    /// or, failing that, by the first poll.
    pub fn new(button: B, indicator: I, config: &Config) -> Self {
        Self {
            button,
            indicator,
            state: ControllerState::new(config.initial_sensor()),
            indicator_synced: false,
            debounce_ms: config.debounce_ms(),
            active_low: config.button_active_low(),
        }
    }

    /// Drives the indicator to match the active sensor.
    pub fn sync_indicator(&mut self) -> Result<(), ControllerError> {
        self.show(self.state.active_sensor())
    }

    fn show(&mut self, sensor: SensorKind) -> Result<(), ControllerError> {
        let level = PinState::from(sensor.is_photoresistor());
        self.indicator
            .set_state(level)
            .map_err(|e| ControllerError::Indicator(e.kind()))?;
        self.indicator_synced = true;
        Ok(())
    }

    /// Reads the logical button level, true while pressed.
    pub fn button_pressed(&mut self) -> Result<bool, ControllerError> {
        let pressed = if self.active_low {
            self.button.is_low()
        } else {
            self.button.is_high()
        };
        pressed.map_err(|e| ControllerError::Button(e.kind()))
    }

    /// Samples the button and applies it. Returns true if the mode changed.
    pub fn poll<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool, ControllerError> {
        let pressed = self.button_pressed()?;
        self.poll_level(pressed, delay)
    }

    /// Applies an already-sampled logical button level.
    ///
    /// On a rising edge the sensor toggles, the indicator is rewritten and the
    /// debounce pause runs before returning. The indicator is also written if
    /// it has never been synced.
    ///
    /// If the indicator write fails the state is left as it was.
    pub fn poll_level<D: DelayNs>(
        &mut self,
        button_level: bool,
        delay: &mut D,
    ) -> Result<bool, ControllerError> {
        let mut next = self.state;
        let toggled = next.register(button_level);

        if toggled || !self.indicator_synced {
            self.show(next.active_sensor())?;
        }
        self.state = next;

        if toggled {
            info!("Mode changed to {}", next.active_sensor());
            delay.delay_ms(self.debounce_ms);
        }
        Ok(toggled)
    }

    /// Returns the currently active sensor.
    #[inline]
    pub fn active_sensor(&self) -> SensorKind {
        self.state.active_sensor()
    }

    /// Returns a copy of the selection state.
    #[inline]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Gives the button and indicator back.
    pub fn release(self) -> (B, I) {
        (self.button, self.indicator)
    }
}

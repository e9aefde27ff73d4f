//! The outdoor light control loop.
//!
//! Provides [`Controller`], which ties the mode selector, the two analog
//! sensors and the four-channel fixture together in a single polling loop.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::Config;
use crate::hardware::{AnalogSensor, Fixture, PwmOutput, Sensors};
use crate::mapper;
use crate::selector::ModeSelector;
use crate::time::Ticker;
use crate::types::{ControllerError, ControllerState, Status};

/// Drives an outdoor light fixture from a selectable analog sensor.
///
/// Each iteration polls the mode button, samples the active sensor, maps the
/// sample to brightness or color and writes the fixture. The controller owns
/// all of its hardware; nothing is shared.
///
/// # Type Parameters
/// * `B` - Mode button input
/// * `I` - Mode indicator output
/// * `L` - Photoresistor input
/// * `P` - Potentiometer input
/// * `M`, `R`, `G`, `Bl` - Master, red, green and blue PWM channels
/// * `D` - Blocking delay used for debounce and the loop period
pub struct Controller<B, I, L, P, M, R, G, Bl, D> {
    selector: ModeSelector<B, I>,
    sensors: Sensors<L, P>,
    fixture: Fixture<M, R, G, Bl>,
    delay: D,
    ticker: Ticker,
    config: Config,
}

impl<B, I, L, P, M, R, G, Bl, D> Controller<B, I, L, P, M, R, G, Bl, D>
where
    B: InputPin,
    I: OutputPin,
    L: AnalogSensor,
    P: AnalogSensor,
    M: PwmOutput,
    R: PwmOutput,
    G: PwmOutput,
    Bl: PwmOutput,
    D: DelayNs,
{
    /// Assembles a controller. No hardware is touched until [`start`](Self::start).
    pub fn new(
        button: B,
        indicator: I,
        sensors: Sensors<L, P>,
        fixture: Fixture<M, R, G, Bl>,
        delay: D,
        config: Config,
    ) -> Self {
        Self {
            selector: ModeSelector::new(button, indicator, &config),
            sensors,
            fixture,
            delay,
            ticker: Ticker::new(config.loop_period_ms()),
            config,
        }
    }

    /// Configures the PWM channels, shows the initial mode and waits for the
    /// start-up settle delay.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        debug!(
            "Configuring fixture at {=u32} Hz",
            self.config.pwm_frequency_hz()
        );
        self.fixture.configure(self.config.pwm_frequency_hz())?;
        self.selector.sync_indicator()?;
        self.delay.delay_ms(self.config.startup_delay_ms());
        info!("Outdoor light started in {} mode", self.selector.active_sensor());
        Ok(())
    }

    /// Runs one iteration without the trailing loop pause.
    ///
    /// # Returns
    /// * `Ok(Status)` - What was read and written this iteration
    /// * `Err` - A hardware capability failed
    pub fn step(&mut self) -> Result<Status, ControllerError> {
        self.selector.poll(&mut self.delay)?;

        let sensor = self.selector.active_sensor();
        let sample = self.sensors.read(sensor).inspect_err(|_| {
            warn!("Sensor read failed in {} mode", sensor);
        })?;

        let output = mapper::map(sensor, sample);
        self.fixture.apply(&output)?;

        let status = Status {
            sensor,
            sample,
            output,
        };
        info!("Mode: {}, Sensor: {=u16}", sensor, sample);
        Ok(status)
    }

    /// Starts the controller and loops until a hardware error occurs.
    pub fn run(&mut self) -> Result<Infallible, ControllerError> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), handing every iteration's [`Status`] to `report`.
    ///
    /// Boards use this to print the status line over their own console.
    pub fn run_with<F>(&mut self, mut report: F) -> Result<Infallible, ControllerError>
    where
        F: FnMut(&Status),
    {
        self.start()?;
        loop {
            let status = self.step()?;
            report(&status);
            self.ticker.wait(&mut self.delay);
        }
    }

    /// Starts the controller and loops until `should_stop` returns true.
    ///
    /// `should_stop` is checked before every iteration, typically
    /// `|| STOP.is_requested()` with a static [`StopSignal`](crate::StopSignal).
    pub fn run_until<F>(&mut self, mut should_stop: F) -> Result<(), ControllerError>
    where
        F: FnMut() -> bool,
    {
        self.start()?;
        while !should_stop() {
            self.step()?;
            self.ticker.wait(&mut self.delay);
        }
        info!("Outdoor light stopped");
        Ok(())
    }

    /// Returns a copy of the mode-selection state.
    pub fn state(&self) -> ControllerState {
        self.selector.state()
    }

    /// Returns the configuration the controller was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tears the controller down into its parts.
    pub fn release(self) -> (ModeSelector<B, I>, Sensors<L, P>, Fixture<M, R, G, Bl>, D) {
        (self.selector, self.sensors, self.fixture, self.delay)
    }
}

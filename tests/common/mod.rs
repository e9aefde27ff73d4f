//! Shared test infrastructure for outdoor-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use outdoor_light::{
    AnalogSensor, Config, Controller, Fixture, PwmOutput, SensorErrorKind, Sensors,
};

// ============================================================================
// Simulated Clock
// ============================================================================

/// Shared simulated time in nanoseconds, advanced only by `MockDelay`
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

/// Blocking delay that advances the simulated clock instead of sleeping
pub struct MockDelay {
    clock: SimClock,
}

impl MockDelay {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_ns(u64::from(ms) * 1_000_000);
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Pull-up button whose presses are scripted as `[start_ms, end_ms)` windows
///
/// The pin reads low while any window covers the current simulated time.
#[derive(Clone)]
pub struct ScriptedButton {
    clock: SimClock,
    presses: Rc<RefCell<Vec<(u64, u64)>>>,
}

impl ScriptedButton {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            presses: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Holds the button down from `start_ms` until just before `end_ms`
    pub fn press(&self, start_ms: u64, end_ms: u64) {
        self.presses.borrow_mut().push((start_ms, end_ms));
    }

    pub fn is_pressed(&self) -> bool {
        let now = self.clock.now_ms();
        self.presses
            .borrow()
            .iter()
            .any(|&(start, end)| (start..end).contains(&now))
    }
}

impl digital::ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_pressed())
    }
}

// ============================================================================
// Mock Indicator
// ============================================================================

/// Output pin that remembers its level and counts writes
#[derive(Clone, Default)]
pub struct MockIndicator {
    level: Rc<Cell<Option<bool>>>,
    writes: Rc<Cell<usize>>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written level, `None` before the first write
    pub fn level(&self) -> Option<bool> {
        self.level.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn record(&self, high: bool) {
        self.level.set(Some(high));
        self.writes.set(self.writes.get() + 1);
    }
}

impl digital::ErrorType for MockIndicator {
    type Error = Infallible;
}

impl OutputPin for MockIndicator {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

/// Indicator fault reported by `FailingIndicator`
#[derive(Debug)]
pub struct IndicatorFault;

impl digital::Error for IndicatorFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Output pin that rejects every write
pub struct FailingIndicator;

impl digital::ErrorType for FailingIndicator {
    type Error = IndicatorFault;
}

impl OutputPin for FailingIndicator {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(IndicatorFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(IndicatorFault)
    }
}

// ============================================================================
// Mock Sensors
// ============================================================================

/// Analog input returning a settable value and counting reads
#[derive(Clone, Default)]
pub struct MockSensor {
    value: Rc<Cell<u16>>,
    reads: Rc<Cell<usize>>,
}

impl MockSensor {
    pub fn new(value: u16) -> Self {
        let sensor = Self::default();
        sensor.set(value);
        sensor
    }

    pub fn set(&self, value: u16) {
        self.value.set(value);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl AnalogSensor for MockSensor {
    type Error = Infallible;

    fn read_u16(&mut self) -> Result<u16, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.value.get())
    }
}

/// Analog input whose converter always fails
pub struct FailingSensor;

impl AnalogSensor for FailingSensor {
    type Error = SensorErrorKind;

    fn read_u16(&mut self) -> Result<u16, Self::Error> {
        Err(SensorErrorKind::Other)
    }
}

/// Analog input that yields a fixed run of samples, then times out
pub struct SampleSequence {
    samples: std::vec::IntoIter<u16>,
}

impl SampleSequence {
    pub fn new(samples: &[u16]) -> Self {
        Self {
            samples: samples.to_vec().into_iter(),
        }
    }
}

impl AnalogSensor for SampleSequence {
    type Error = SensorErrorKind;

    fn read_u16(&mut self) -> Result<u16, Self::Error> {
        self.samples.next().ok_or(SensorErrorKind::Timeout)
    }
}

// ============================================================================
// Mock PWM
// ============================================================================

/// PWM channel that records its frequency and raw duty
#[derive(Clone)]
pub struct MockPwm {
    max_duty: u16,
    duty: Rc<Cell<Option<u16>>>,
    frequency: Rc<Cell<Option<u32>>>,
    duty_writes: Rc<Cell<usize>>,
}

impl MockPwm {
    /// Creates a channel with the full 16-bit resolution
    pub fn new() -> Self {
        Self::with_max_duty(u16::MAX)
    }

    pub fn with_max_duty(max_duty: u16) -> Self {
        Self {
            max_duty,
            duty: Rc::new(Cell::new(None)),
            frequency: Rc::new(Cell::new(None)),
            duty_writes: Rc::new(Cell::new(0)),
        }
    }

    /// Last raw duty written, `None` before the first write
    pub fn duty(&self) -> Option<u16> {
        self.duty.get()
    }

    pub fn frequency(&self) -> Option<u32> {
        self.frequency.get()
    }

    pub fn duty_writes(&self) -> usize {
        self.duty_writes.get()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.set(Some(duty));
        self.duty_writes.set(self.duty_writes.get() + 1);
        Ok(())
    }
}

impl PwmOutput for MockPwm {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        self.frequency.set(Some(hz));
        Ok(())
    }
}

/// PWM fault reported by `FailingPwm`
#[derive(Debug)]
pub struct PwmFault;

impl pwm::Error for PwmFault {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// PWM channel that rejects every write
pub struct FailingPwm;

impl pwm::ErrorType for FailingPwm {
    type Error = PwmFault;
}

impl SetDutyCycle for FailingPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Err(PwmFault)
    }
}

impl PwmOutput for FailingPwm {
    fn set_frequency(&mut self, _hz: u32) -> Result<(), Self::Error> {
        Err(PwmFault)
    }
}

// ============================================================================
// Test Rig
// ============================================================================

pub type TestController = Controller<
    ScriptedButton,
    MockIndicator,
    MockSensor,
    MockSensor,
    MockPwm,
    MockPwm,
    MockPwm,
    MockPwm,
    MockDelay,
>;

/// Handles onto every mock inside a `TestController`
pub struct Rig {
    pub clock: SimClock,
    pub button: ScriptedButton,
    pub indicator: MockIndicator,
    pub photoresistor: MockSensor,
    pub potentiometer: MockSensor,
    pub master: MockPwm,
    pub red: MockPwm,
    pub green: MockPwm,
    pub blue: MockPwm,
}

/// Builds a controller on fresh mocks, keeping handles for inspection
pub fn build_controller(config: Config) -> (TestController, Rig) {
    let clock = SimClock::new();
    let rig = Rig {
        button: ScriptedButton::new(&clock),
        indicator: MockIndicator::new(),
        photoresistor: MockSensor::new(0),
        potentiometer: MockSensor::new(0),
        master: MockPwm::new(),
        red: MockPwm::new(),
        green: MockPwm::new(),
        blue: MockPwm::new(),
        clock,
    };

    let controller = Controller::new(
        rig.button.clone(),
        rig.indicator.clone(),
        Sensors::new(rig.photoresistor.clone(), rig.potentiometer.clone()),
        Fixture::new(
            rig.master.clone(),
            rig.red.clone(),
            rig.green.clone(),
            rig.blue.clone(),
        ),
        MockDelay::new(&rig.clock),
        config,
    );

    (controller, rig)
}

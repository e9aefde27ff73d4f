//! Fixed controller constants and their validating builder.

use core::fmt;

use crate::types::SensorKind;

/// Timing and start-up constants for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pwm_frequency_hz: u32,
    debounce_ms: u32,
    loop_period_ms: u32,
    startup_delay_ms: u32,
    initial_sensor: SensorKind,
    button_active_low: bool,
}

impl Config {
    /// 1 kHz PWM, 50 ms debounce, 100 ms loop period, 1 s start-up settle,
    /// photoresistor mode, pull-up button.
    pub const DEFAULT: Config = Config {
        pwm_frequency_hz: 1_000,
        debounce_ms: 50,
        loop_period_ms: 100,
        startup_delay_ms: 1_000,
        initial_sensor: SensorKind::Photoresistor,
        button_active_low: true,
    };

    /// Creates a builder starting from [`Config::DEFAULT`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// PWM frequency applied to all four channels.
    pub fn pwm_frequency_hz(&self) -> u32 {
        self.pwm_frequency_hz
    }

    /// Blocking pause after a detected mode toggle.
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Pause at the end of every loop iteration.
    pub fn loop_period_ms(&self) -> u32 {
        self.loop_period_ms
    }

    /// Pause between hardware setup and the first iteration.
    pub fn startup_delay_ms(&self) -> u32 {
        self.startup_delay_ms
    }

    pub fn initial_sensor(&self) -> SensorKind {
        self.initial_sensor
    }

    /// Whether a low pin level means the button is pressed.
    pub fn button_active_low(&self) -> bool {
        self.button_active_low
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PWM frequency of 0 Hz.
    ZeroFrequency,

    /// Loop period of 0 ms.
    ZeroLoopPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFrequency => write!(f, "PWM frequency must be non-zero"),
            ConfigError::ZeroLoopPeriod => write!(f, "loop period must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for validated [`Config`] values.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder holding the default constants.
    pub fn new() -> Self {
        Self {
            config: Config::DEFAULT,
        }
    }

    pub fn pwm_frequency_hz(mut self, hz: u32) -> Self {
        self.config.pwm_frequency_hz = hz;
        self
    }

    pub fn debounce_ms(mut self, ms: u32) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn loop_period_ms(mut self, ms: u32) -> Self {
        self.config.loop_period_ms = ms;
        self
    }

    pub fn startup_delay_ms(mut self, ms: u32) -> Self {
        self.config.startup_delay_ms = ms;
        self
    }

    pub fn initial_sensor(mut self, sensor: SensorKind) -> Self {
        self.config.initial_sensor = sensor;
        self
    }

    /// Sets whether the button pulls its pin low when pressed.
    ///
    /// Default is `true`, matching a button wired to ground with a pull-up.
    pub fn button_active_low(mut self, active_low: bool) -> Self {
        self.config.button_active_low = active_low;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroFrequency` - PWM frequency is 0
    /// * `ZeroLoopPeriod` - loop period is 0
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.config.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }

        if self.config.loop_period_ms == 0 {
            return Err(ConfigError::ZeroLoopPeriod);
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Controller configuration types.
//!
//! This module contains the configuration loaded once at startup from the
//! first CLI argument:
//! - `ControllerConfig` - Root of the TOML document
//! - `SerialConfig` / `GpioConfig` / `UnitsConfig` - Hardware wiring
//! - `MotorsConfig` - Encoder, PID and wheel geometry
//! - `MonitorsConfig` - Poll intervals, thresholds and watchdog timeouts
//! - `SimulationConfig` - Parameters of the software plant
//!
//! Every field has a default, so an empty file is a valid configuration.
//! Unknown keys are rejected.

use crate::config::ConfigError;
use crate::hal::consts::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn default_driver() -> String {
    SIMULATION_DRIVER.to_string()
}

/// Root configuration document.
///
/// # TOML Example
///
/// ```toml
/// driver = "simulation"
///
/// [motors]
/// wheel_radius_mm = 60
///
/// [monitors]
/// error_interval_ms = 500
/// critical_read_repeats = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Name of the registered driver to load.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Serial link to the units.
    #[serde(default)]
    pub serial: SerialConfig,

    /// Reset line and status LEDs.
    #[serde(default)]
    pub gpio: GpioConfig,

    /// Packet-serial addresses of both units.
    #[serde(default)]
    pub units: UnitsConfig,

    /// Encoder, PID and wheel geometry.
    #[serde(default)]
    pub motors: MotorsConfig,

    /// Safety monitors.
    #[serde(default)]
    pub monitors: MonitorsConfig,

    /// Software plant used by the `simulation` driver.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            serial: SerialConfig::default(),
            gpio: GpioConfig::default(),
            units: UnitsConfig::default(),
            motors: MotorsConfig::default(),
            monitors: MonitorsConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. `driver` is not empty
    /// 2. Unit addresses are within 0x80..=0x87 and distinct
    /// 3. `wheel_radius_mm` and `pulses_per_revolution` > 0
    /// 4. `temperature_drop` < `temperature_critical`
    /// 5. Watchdog timeouts and tick > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "driver cannot be empty".to_string(),
            ));
        }

        for (name, address) in [
            ("front_address", self.units.front_address),
            ("rear_address", self.units.rear_address),
        ] {
            if !(MIN_UNIT_ADDRESS..=MAX_UNIT_ADDRESS).contains(&address) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} {address} outside {MIN_UNIT_ADDRESS}..={MAX_UNIT_ADDRESS}"
                )));
            }
        }
        if self.units.front_address == self.units.rear_address {
            return Err(ConfigError::ValidationError(format!(
                "front and rear units share address {}",
                self.units.front_address
            )));
        }

        if self.motors.wheel_radius_mm == 0 {
            return Err(ConfigError::ValidationError(
                "wheel_radius_mm must be greater than 0".to_string(),
            ));
        }
        if self.motors.pulses_per_revolution == 0 {
            return Err(ConfigError::ValidationError(
                "pulses_per_revolution must be greater than 0".to_string(),
            ));
        }

        let monitors = &self.monitors;
        if monitors.temperature_drop >= monitors.temperature_critical {
            return Err(ConfigError::ValidationError(format!(
                "temperature_drop ({}) must be below temperature_critical ({})",
                monitors.temperature_drop, monitors.temperature_critical
            )));
        }
        if monitors.stop_idle_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "stop_idle_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if monitors.reset_idle_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "reset_idle_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if monitors.watchdog_tick_ms == 0 {
            return Err(ConfigError::ValidationError(
                "watchdog_tick_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Serial link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    /// Serial device path.
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// GPIO wiring of the reset line and status LEDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpioConfig {
    /// Value file of the reset line.
    pub reset_path: PathBuf,
    /// Time the units need to boot after a reset [ms].
    pub reset_delay_ms: u64,
    /// Value file of the activity LED.
    pub activity_led_path: PathBuf,
    /// Value file of the battery alarm LED.
    pub battery_led_path: PathBuf,
}

impl GpioConfig {
    /// Reset delay as Duration.
    pub const fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            reset_path: PathBuf::from(DEFAULT_RESET_GPIO_PATH),
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            activity_led_path: PathBuf::from(DEFAULT_ACTIVITY_LED_PATH),
            battery_led_path: PathBuf::from(DEFAULT_BATTERY_LED_PATH),
        }
    }
}

/// Packet-serial addresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitsConfig {
    /// Address of the front unit.
    pub front_address: u8,
    /// Address of the rear unit.
    pub rear_address: u8,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            front_address: DEFAULT_FRONT_ADDRESS,
            rear_address: DEFAULT_REAR_ADDRESS,
        }
    }
}

/// Encoder, PID and wheel geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorsConfig {
    /// Maximum encoder speed [pulses/s].
    pub max_qpps: u32,
    /// PID proportional constant.
    pub p_const: u32,
    /// PID integral constant.
    pub i_const: u32,
    /// PID derivative constant.
    pub d_const: u32,
    /// Encoder pulses per wheel revolution.
    pub pulses_per_revolution: u32,
    /// Wheel radius [mm].
    pub wheel_radius_mm: u32,
}

impl Default for MotorsConfig {
    fn default() -> Self {
        Self {
            max_qpps: DEFAULT_MAX_QPPS,
            p_const: DEFAULT_P_CONST,
            i_const: DEFAULT_I_CONST,
            d_const: DEFAULT_D_CONST,
            pulses_per_revolution: DEFAULT_PULSES_PER_REVOLUTION,
            wheel_radius_mm: DEFAULT_WHEEL_RADIUS_MM,
        }
    }
}

/// Safety monitor settings.
///
/// A poll interval of 0 disables the corresponding monitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorsConfig {
    /// Battery voltage poll interval [ms].
    pub battery_interval_ms: u64,
    /// Fault register poll interval [ms].
    pub error_interval_ms: u64,
    /// Temperature poll interval [ms].
    pub temperature_interval_ms: u64,
    /// Temperature at which the units count as overheated [0.1 °C].
    pub temperature_critical: u16,
    /// Temperature both units must fall below to recover [0.1 °C].
    pub temperature_drop: u16,
    /// Confirmation re-reads before acting on an abnormal reading.
    pub critical_read_repeats: u32,
    /// Dead-man timeout after the last motor command [ms].
    pub stop_idle_timeout_ms: u64,
    /// Idle time after which the units are reset [ms].
    pub reset_idle_timeout_ms: u64,
    /// Watchdog polling period [ms].
    pub watchdog_tick_ms: u64,
}

impl MonitorsConfig {
    /// Battery monitor interval, `None` when disabled.
    pub fn battery_interval(&self) -> Option<Duration> {
        enabled_interval(self.battery_interval_ms)
    }

    /// Error monitor interval, `None` when disabled.
    pub fn error_interval(&self) -> Option<Duration> {
        enabled_interval(self.error_interval_ms)
    }

    /// Thermal monitor interval, `None` when disabled.
    pub fn temperature_interval(&self) -> Option<Duration> {
        enabled_interval(self.temperature_interval_ms)
    }

    /// Dead-man timeout as Duration.
    pub const fn stop_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_idle_timeout_ms)
    }

    /// Idle reset timeout as Duration.
    pub const fn reset_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.reset_idle_timeout_ms)
    }

    /// Watchdog polling period as Duration.
    pub const fn watchdog_tick(&self) -> Duration {
        Duration::from_millis(self.watchdog_tick_ms)
    }
}

fn enabled_interval(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

impl Default for MonitorsConfig {
    fn default() -> Self {
        Self {
            battery_interval_ms: 0,
            error_interval_ms: 0,
            temperature_interval_ms: 0,
            temperature_critical: DEFAULT_TEMPERATURE_CRITICAL,
            temperature_drop: DEFAULT_TEMPERATURE_DROP,
            critical_read_repeats: 0,
            stop_idle_timeout_ms: DEFAULT_STOP_IDLE_TIMEOUT_MS,
            reset_idle_timeout_ms: DEFAULT_RESET_IDLE_TIMEOUT_MS,
            watchdog_tick_ms: DEFAULT_WATCHDOG_TICK_MS,
        }
    }
}

/// Software plant parameters for the `simulation` driver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Ambient temperature [0.1 °C].
    pub ambient_temperature: u16,
    /// Temperature rise at full speed above ambient [0.1 °C].
    pub full_load_heating: u16,
    /// Thermal time constant [s].
    pub thermal_time_constant_s: f64,
    /// Temperature at which a unit latches its over-temperature bit [0.1 °C].
    pub temperature_latch: u16,
    /// Battery voltage at startup [0.1 V].
    pub initial_voltage: u16,
    /// Voltage lost per minute of driving at full speed [0.1 V].
    pub discharge_per_minute: f64,
    /// Voltage below which the units report main battery low [0.1 V].
    pub battery_low_voltage: u16,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ambient_temperature: 250,
            full_load_heating: 400,
            thermal_time_constant_s: 120.0,
            temperature_latch: 850,
            initial_voltage: 124,
            discharge_per_minute: 1.0,
            battery_low_voltage: 105,
        }
    }
}

//! Board plant model.
//!
//! The `BoardPlant` models what the supervisor can observe of the board:
//! - Wheel speeds ramping towards the commanded speed
//! - First-order board temperature per unit, driven by wheel load
//! - Main battery discharging with load
//! - Error status registers derived from the above, latched until reset

use roboclaw_common::hal::config::SimulationConfig;
use roboclaw_common::hal::driver::DriverError;
use roboclaw_common::hal::types::{FaultPair, FaultStatus, MotorsSpeed, Temperatures, Unit};
use std::time::Duration;
use tracing::{debug, trace};

/// Time a wheel needs to ramp from standstill to `max_qpps` [s].
const RAMP_TIME_S: f64 = 0.5;

/// One addressed unit driving two wheels.
#[derive(Debug, Clone)]
pub struct UnitPlant {
    unit: Unit,
    /// Commanded speed of motor 1 / motor 2 [pulses/s]
    commanded: [i32; 2],
    /// Actual speed of motor 1 / motor 2 [pulses/s]
    actual: [f64; 2],
    /// Board temperature [0.1 °C]
    temperature: f64,
    /// Latched fault bits (cleared by reset)
    latched: FaultStatus,
    /// Encoder settings present
    configured: bool,
}

impl UnitPlant {
    fn new(unit: Unit, ambient: u16) -> Self {
        Self {
            unit,
            commanded: [0; 2],
            actual: [0.0; 2],
            temperature: ambient as f64,
            latched: FaultStatus::NORMAL,
            configured: false,
        }
    }

    /// Unit this plant models.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Mean wheel load in `0.0..=1.0`.
    fn load(&self, max_qpps: f64) -> f64 {
        if max_qpps <= 0.0 {
            return 0.0;
        }
        let mean = (self.actual[0].abs() + self.actual[1].abs()) / 2.0;
        (mean / max_qpps).min(1.0)
    }

    fn advance(&mut self, dt_s: f64, max_qpps: f64, config: &SimulationConfig) {
        let max_step = max_qpps / RAMP_TIME_S * dt_s;
        for (actual, commanded) in self.actual.iter_mut().zip(self.commanded) {
            let error = commanded as f64 - *actual;
            *actual += error.clamp(-max_step, max_step);
        }

        let target = config.ambient_temperature as f64
            + config.full_load_heating as f64 * self.load(max_qpps);
        let tau = config.thermal_time_constant_s.max(f64::EPSILON);
        self.temperature += (target - self.temperature) * (1.0 - (-dt_s / tau).exp());

        if self.temperature >= config.temperature_latch as f64
            && !self.latched.contains(FaultStatus::TEMPERATURE)
        {
            debug!(unit = %self.unit, "simulated over-temperature latch");
            self.latched |= FaultStatus::TEMPERATURE;
        }
    }

    fn reset(&mut self) {
        self.commanded = [0; 2];
        self.actual = [0.0; 2];
        self.latched = FaultStatus::NORMAL;
        self.configured = false;
    }

    fn speeds(&self) -> [i32; 2] {
        [self.actual[0].round() as i32, self.actual[1].round() as i32]
    }
}

/// Model of the whole board: two units and the shared main battery.
#[derive(Debug, Clone)]
pub struct BoardPlant {
    config: SimulationConfig,
    max_qpps: f64,
    front: UnitPlant,
    rear: UnitPlant,
    /// Main battery voltage [0.1 V]
    voltage: f64,
}

impl BoardPlant {
    /// Create a plant at ambient temperature with a charged battery.
    ///
    /// Units start unconfigured, as after a power-on reset.
    pub fn new(config: SimulationConfig, max_qpps: u32) -> Self {
        Self {
            front: UnitPlant::new(Unit::Front, config.ambient_temperature),
            rear: UnitPlant::new(Unit::Rear, config.ambient_temperature),
            voltage: config.initial_voltage as f64,
            max_qpps: max_qpps as f64,
            config,
        }
    }

    /// Advance the model by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let dt_s = dt.as_secs_f64();
        if dt_s <= 0.0 {
            return;
        }
        self.front.advance(dt_s, self.max_qpps, &self.config);
        self.rear.advance(dt_s, self.max_qpps, &self.config);

        let load = (self.front.load(self.max_qpps) + self.rear.load(self.max_qpps)) / 2.0;
        self.voltage = (self.voltage - self.config.discharge_per_minute * load * dt_s / 60.0)
            .max(0.0);
        trace!(voltage = self.voltage, load, "plant advanced");
    }

    /// Command the four wheel speeds, clamped to `max_qpps`.
    ///
    /// # Errors
    /// `DriverError::NotConfigured` while a unit waits for encoder settings.
    pub fn command(&mut self, speed: MotorsSpeed) -> Result<(), DriverError> {
        self.ensure_configured()?;
        let limit = self.max_qpps as i32;
        let speed = speed.map(|s| s.clamp(-limit, limit));
        self.front.commanded = [speed.front_left, speed.front_right];
        self.rear.commanded = [speed.rear_left, speed.rear_right];
        Ok(())
    }

    /// Command zero speed on every wheel.
    pub fn stop(&mut self) {
        self.front.commanded = [0; 2];
        self.rear.commanded = [0; 2];
    }

    /// Hardware reset: wheels stop, latches clear, settings are lost.
    pub fn reset(&mut self) {
        self.front.reset();
        self.rear.reset();
    }

    /// Apply encoder settings to both units.
    pub fn configure(&mut self) {
        self.front.configured = true;
        self.rear.configured = true;
    }

    /// Whether both units hold encoder settings.
    pub fn is_configured(&self) -> bool {
        self.front.configured && self.rear.configured
    }

    /// Current wheel speeds [pulses/s].
    pub fn speeds(&self) -> MotorsSpeed {
        let [front_left, front_right] = self.front.speeds();
        let [rear_left, rear_right] = self.rear.speeds();
        MotorsSpeed {
            front_left,
            front_right,
            rear_left,
            rear_right,
        }
    }

    /// Current board temperatures [0.1 °C].
    pub fn temperatures(&self) -> Temperatures {
        Temperatures::new(
            self.front.temperature.round() as u16,
            self.rear.temperature.round() as u16,
        )
    }

    /// Current main battery voltage [0.1 V].
    pub fn voltage(&self) -> u16 {
        self.voltage.round() as u16
    }

    /// Error status registers of both units.
    pub fn faults(&self) -> FaultPair {
        let mut live = FaultStatus::NORMAL;
        if self.voltage < self.config.battery_low_voltage as f64 {
            live |= FaultStatus::MAIN_BATTERY_LOW;
        }
        FaultPair::new(self.front.latched | live, self.rear.latched | live)
    }

    /// Latch `fault` on `unit` until the next reset.
    pub fn inject_fault(&mut self, unit: Unit, fault: FaultStatus) {
        self.unit_mut(unit).latched |= fault;
    }

    /// Force the board temperature of `unit` [0.1 °C].
    pub fn set_temperature(&mut self, unit: Unit, temperature: u16) {
        self.unit_mut(unit).temperature = temperature as f64;
    }

    /// Force the main battery voltage [0.1 V].
    pub fn set_voltage(&mut self, voltage: u16) {
        self.voltage = voltage as f64;
    }

    fn unit_mut(&mut self, unit: Unit) -> &mut UnitPlant {
        match unit {
            Unit::Front => &mut self.front,
            Unit::Rear => &mut self.rear,
        }
    }

    fn ensure_configured(&self) -> Result<(), DriverError> {
        for plant in [&self.front, &self.rear] {
            if !plant.configured {
                return Err(DriverError::NotConfigured(format!(
                    "{} unit awaiting encoder settings",
                    plant.unit
                )));
            }
        }
        Ok(())
    }
}

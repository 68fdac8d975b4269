//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `MotorDriver` trait on top of a
//! [`BoardPlant`], advancing the plant by wall-clock time on every call.

use super::plant::BoardPlant;
use roboclaw_common::hal::config::{ControllerConfig, MotorsConfig};
use roboclaw_common::hal::driver::{DriverError, MotorDriver};
use roboclaw_common::hal::types::{FaultPair, Indicator, MotorsSpeed, Temperatures};
use std::time::Instant;
use tracing::{debug, info};

/// Simulation driver implementing the MotorDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Board model (present after init)
    plant: Option<BoardPlant>,
    /// Encoder/PID settings pushed on configure
    motors: MotorsConfig,
    /// Last time the plant was advanced
    last_update: Option<Instant>,
    /// Activity LED state
    activity_led: bool,
    /// Battery alarm LED state
    battery_led: bool,
    /// Number of hardware resets issued
    reset_count: u64,
}

impl SimulationDriver {
    /// Create a new, uninitialized simulation driver.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            plant: None,
            motors: MotorsConfig::default(),
            last_update: None,
            activity_led: false,
            battery_led: false,
            reset_count: 0,
        }
    }

    /// Board model, if initialized.
    pub fn plant(&self) -> Option<&BoardPlant> {
        self.plant.as_ref()
    }

    /// Mutable board model, if initialized (fault injection).
    pub fn plant_mut(&mut self) -> Option<&mut BoardPlant> {
        self.plant.as_mut()
    }

    /// Current state of a status LED.
    pub fn indicator(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Activity => self.activity_led,
            Indicator::BatteryAlarm => self.battery_led,
        }
    }

    /// Number of hardware resets issued since init.
    pub fn reset_count(&self) -> u64 {
        self.reset_count
    }

    /// Advance the plant to now and return it.
    fn sync(&mut self) -> Result<&mut BoardPlant, DriverError> {
        let now = Instant::now();
        let plant = self
            .plant
            .as_mut()
            .ok_or_else(|| DriverError::NotConfigured("driver not initialized".to_string()))?;
        if let Some(last) = self.last_update {
            plant.advance(now.duration_since(last));
        }
        self.last_update = Some(now);
        Ok(plant)
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, config: &ControllerConfig) -> Result<(), DriverError> {
        info!(
            "Initializing simulation driver (port {} @ {} baud, units {:#x}/{:#x})",
            config.serial.port,
            config.serial.baud_rate,
            config.units.front_address,
            config.units.rear_address
        );

        self.motors = config.motors;
        let mut plant = BoardPlant::new(config.simulation, config.motors.max_qpps);
        plant.configure();
        self.plant = Some(plant);
        self.last_update = Some(Instant::now());
        self.reset_count = 0;

        info!("Simulation driver initialized");
        Ok(())
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), DriverError> {
        match indicator {
            Indicator::Activity => self.activity_led = on,
            Indicator::BatteryAlarm => self.battery_led = on,
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DriverError> {
        self.sync()?.reset();
        self.reset_count += 1;
        debug!("Simulated reset #{}", self.reset_count);
        Ok(())
    }

    fn push_encoder_settings(&mut self) -> Result<(), DriverError> {
        let motors = self.motors;
        self.sync()?.configure();
        debug!(
            "Encoder settings applied: P={} I={} D={} max_qpps={}",
            motors.p_const, motors.i_const, motors.d_const, motors.max_qpps
        );
        Ok(())
    }

    fn stop_motors(&mut self) -> Result<(), DriverError> {
        self.sync()?.stop();
        Ok(())
    }

    fn send_speed(&mut self, speed: MotorsSpeed) -> Result<(), DriverError> {
        self.sync()?.command(speed)
    }

    fn read_speed(&mut self) -> Result<MotorsSpeed, DriverError> {
        Ok(self.sync()?.speeds())
    }

    fn read_bus_voltage(&mut self) -> Result<u16, DriverError> {
        Ok(self.sync()?.voltage())
    }

    fn read_fault_status(&mut self) -> Result<FaultPair, DriverError> {
        Ok(self.sync()?.faults())
    }

    fn read_temperature(&mut self) -> Result<Temperatures, DriverError> {
        Ok(self.sync()?.temperatures())
    }
}

//! Controller context shared by the monitors and the dispatcher.
//!
//! Built once at startup and handed to every component behind an `Arc`.

use crate::device::DeviceBus;
use crate::error::IoError;
use crate::safety::state::SafetyState;
use crate::units::UnitConverter;
use roboclaw_common::hal::config::ControllerConfig;
use roboclaw_common::hal::driver::{DriverError, MotorDriver};
use roboclaw_common::hal::types::Indicator;
use std::time::Instant;
use tracing::{debug, warn};

/// Configuration, safety state and device bus for one board.
#[derive(Debug)]
pub struct ControllerContext {
    config: ControllerConfig,
    units: UnitConverter,
    safety: SafetyState,
    bus: DeviceBus,
}

impl ControllerContext {
    /// Context around an initialized driver. The watchdogs are armed from now.
    pub fn new(config: ControllerConfig, driver: Box<dyn MotorDriver>) -> Self {
        let safety = SafetyState::new(
            config.monitors.stop_idle_timeout(),
            config.monitors.reset_idle_timeout(),
            Instant::now(),
        );
        Self {
            units: UnitConverter::from_config(&config.motors),
            config,
            safety,
            bus: DeviceBus::new(driver),
        }
    }

    /// Controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Speed converter for the configured wheels.
    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    /// Shared safety flags and watchdog deadlines.
    pub fn safety(&self) -> &SafetyState {
        &self.safety
    }

    /// Device bus (used directly only by the reset procedure).
    pub(crate) fn bus(&self) -> &DeviceBus {
        &self.bus
    }

    /// Run `op` on the driver with the bus held.
    ///
    /// # Errors
    /// `IoError::Disabled` without calling `op` while a reset is in flight;
    /// `IoError::Driver` when `op` fails.
    pub fn device_io<T>(
        &self,
        op: impl FnOnce(&mut dyn MotorDriver) -> Result<T, DriverError>,
    ) -> Result<T, IoError> {
        let mut driver = self.bus.lock();
        if self.safety.is_disabled() {
            return Err(IoError::Disabled);
        }
        Ok(op(&mut **driver)?)
    }

    /// Switch a status LED. Allowed during a reset.
    pub fn set_indicator(&self, indicator: Indicator, on: bool) {
        if let Err(e) = self.bus.lock().set_indicator(indicator, on) {
            warn!(?indicator, on, error = %e, "failed to switch indicator");
        }
    }

    /// Command all motors stopped. Skipped during a reset.
    pub fn stop_motors(&self, reason: &str) {
        match self.device_io(|d| d.stop_motors()) {
            Ok(()) => debug!(reason, "motors stopped"),
            Err(IoError::Disabled) => debug!(reason, "stop skipped, reset in flight"),
            Err(e) => warn!(reason, error = %e, "failed to stop motors"),
        }
    }
}

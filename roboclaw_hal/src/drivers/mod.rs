//! Motor driver implementations.
//!
//! - [`simulation`] - Software plant for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `MotorDriver` trait from `roboclaw_common::hal::driver`
//! 3. Register the driver in [`register_all_drivers`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;
use roboclaw_common::hal::consts::SIMULATION_DRIVER;

/// Register all built-in drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register(SIMULATION_DRIVER, simulation::create_driver);
}

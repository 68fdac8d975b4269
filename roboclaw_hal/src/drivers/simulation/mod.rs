//! Simulation driver module.
//!
//! This module provides a software model of the dual motor-controller board
//! for development and testing without physical hardware.

mod driver;
mod plant;

pub use driver::SimulationDriver;
pub use plant::{BoardPlant, UnitPlant};

use roboclaw_common::hal::driver::MotorDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn MotorDriver> {
    Box::new(SimulationDriver::new())
}

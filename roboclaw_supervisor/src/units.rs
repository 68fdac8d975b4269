//! Conversion between wheel speeds in mm/s and encoder pulses per second.

use roboclaw_common::hal::config::MotorsConfig;
use roboclaw_common::hal::types::MotorsSpeed;
use std::f64::consts::PI;

/// Wheel geometry used to convert speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    circumference_mm: f64,
    pulses_per_revolution: f64,
}

impl UnitConverter {
    /// Converter for a wheel of `wheel_radius_mm` with `pulses_per_revolution`.
    pub fn new(wheel_radius_mm: u32, pulses_per_revolution: u32) -> Self {
        Self {
            circumference_mm: 2.0 * PI * f64::from(wheel_radius_mm),
            pulses_per_revolution: f64::from(pulses_per_revolution),
        }
    }

    /// Converter for the configured wheel geometry.
    pub fn from_config(motors: &MotorsConfig) -> Self {
        Self::new(motors.wheel_radius_mm, motors.pulses_per_revolution)
    }

    /// mm/s to pulses/s, rounded to nearest.
    pub fn to_device(&self, mmps: i32) -> i32 {
        (f64::from(mmps) / self.circumference_mm * self.pulses_per_revolution).round() as i32
    }

    /// Pulses/s to mm/s, rounded to nearest.
    pub fn to_physical(&self, pps: i32) -> i32 {
        (f64::from(pps) * self.circumference_mm / self.pulses_per_revolution).round() as i32
    }

    /// Convert all four wheels to device units.
    pub fn speed_to_device(&self, speed: MotorsSpeed) -> MotorsSpeed {
        speed.map(|s| self.to_device(s))
    }

    /// Convert all four wheels to physical units.
    pub fn speed_to_physical(&self, speed: MotorsSpeed) -> MotorsSpeed {
        speed.map(|s| self.to_physical(s))
    }
}

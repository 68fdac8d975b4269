//! Motor driver trait and error types.
//!
//! This module defines:
//! - `MotorDriver` trait - Facade over the dual motor-controller board
//! - `DriverError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type

use crate::hal::config::ControllerConfig;
use crate::hal::types::{FaultPair, Indicator, MotorsSpeed, Temperatures};
use thiserror::Error;

/// Error types for driver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Driver initialization failed.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Transient serial communication error (bad checksum, timeout, ...).
    #[error("Hardware communication error: {0}")]
    Communication(String),

    /// Units are not configured (reset without encoder settings).
    #[error("Units not configured: {0}")]
    NotConfigured(String),

    /// Driver not found in the registry.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn MotorDriver>;

/// Facade over the two addressed motor-controller units.
///
/// Speeds crossing this trait are in device units (encoder pulses per
/// second). Every primitive may fail with a transient
/// [`DriverError::Communication`]; callers own the retry policy.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before any monitor starts
/// 2. I/O primitives - Called from the supervisor, serialized by its bus
///
/// Implementations are never called concurrently; the supervisor owns the
/// single instance behind a lock.
pub trait MotorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Open the link and configure both units.
    ///
    /// # Errors
    /// Return `DriverError::InitFailed` if the units cannot be brought up.
    fn init(&mut self, config: &ControllerConfig) -> Result<(), DriverError>;

    /// Switch a status LED.
    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), DriverError>;

    /// Pulse the hardware reset line of both units.
    fn reset(&mut self) -> Result<(), DriverError>;

    /// Push encoder mode, PID constants and maximum speed to both units.
    fn push_encoder_settings(&mut self) -> Result<(), DriverError>;

    /// Command zero speed on every wheel.
    fn stop_motors(&mut self) -> Result<(), DriverError>;

    /// Command the four wheel speeds [pulses/s].
    fn send_speed(&mut self, speed: MotorsSpeed) -> Result<(), DriverError>;

    /// Read the four wheel speeds [pulses/s].
    fn read_speed(&mut self) -> Result<MotorsSpeed, DriverError>;

    /// Read the main battery voltage [0.1 V].
    fn read_bus_voltage(&mut self) -> Result<u16, DriverError>;

    /// Read the error status register of both units.
    fn read_fault_status(&mut self) -> Result<FaultPair, DriverError>;

    /// Read the board temperature of both units [0.1 °C].
    fn read_temperature(&mut self) -> Result<Temperatures, DriverError>;
}

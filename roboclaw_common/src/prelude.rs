//! Prelude module for common re-exports.
//!
//! ```rust
//! use roboclaw_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, LoggingConfig};
pub use crate::hal::config::{ControllerConfig, MonitorsConfig, MotorsConfig};

// ─── Driver facade ──────────────────────────────────────────────────
pub use crate::hal::driver::{DriverError, DriverFactory, MotorDriver};

// ─── Value types ────────────────────────────────────────────────────
pub use crate::hal::types::{
    ClientId, FaultPair, FaultStatus, Indicator, MotorsSpeed, Temperatures, Unit, UnitPair,
};

//! # Roboclaw Supervisor Library
//!
//! Supervises a board carrying two addressed Roboclaw motor controllers
//! (four wheels) and exposes speed control and telemetry to one commanding
//! client over a newline-delimited JSON pipe.
//!
//! ## Threads
//!
//! - **watchdog** - Dead-man stop and periodic idle reset
//! - **error-monitor** - Fault registers, confirmed before acting
//! - **thermal-monitor** - Temperature hysteresis
//! - **battery-monitor** - Voltage logging
//! - **main** - Message pipe and [`dispatch::Dispatcher`]
//!
//! All of them share one [`context::ControllerContext`]: the safety flags,
//! the watchdog deadlines and the single device bus.
//!
//! ## Escalation
//!
//! 1. Stop the motors (dead-man timeout, overheat, client death)
//! 2. Reset and reconfigure the units (overcurrent, cool-down, idle)
//! 3. Latch battery-low: commands dropped, monitors stopped for good

pub mod context;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod safety;
pub mod supervisor;
pub mod transport;
pub mod units;

pub use context::ControllerContext;
pub use dispatch::{ClientMessage, Dispatcher, ResponseSink};
pub use error::{IoError, SupervisorError, TransportError};
pub use supervisor::Supervisor;
pub use units::UnitConverter;

//! # Roboclaw HAL Library
//!
//! Driver registry and driver implementations for the dual motor-controller
//! board. Drivers implement the `MotorDriver` trait defined in
//! `roboclaw_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 roboclaw_hal                          │
//! │  ┌──────────────────┐      ┌───────────────────────┐  │
//! │  │ DriverRegistry   │─────►│ MotorDriver           │  │
//! │  │ (name → factory) │      │ (trait object)        │  │
//! │  └──────────────────┘      └───────────┬───────────┘  │
//! │                                        │              │
//! │                            ┌───────────▼───────────┐  │
//! │                            │ SimulationDriver      │  │
//! │                            └───────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::register_all_drivers;

//! Safety module root.
//!
//! Shared safety state, the reset-and-wait recovery, and the four periodic
//! monitors (watchdog, fault register, temperature, battery).

pub mod battery;
pub mod errors;
pub mod monitor;
pub mod reset;
pub mod state;
pub mod thermal;
pub mod watchdog;

pub use battery::BatteryMonitor;
pub use errors::ErrorMonitor;
pub use monitor::{Monitor, MonitorState, spawn_monitor};
pub use reset::ResetOutcome;
pub use state::{SafetyState, WatchdogDue};
pub use thermal::ThermalMonitor;
pub use watchdog::WatchdogMonitor;

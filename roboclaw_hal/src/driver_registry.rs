//! Name-to-driver lookup used at startup.
//!
//! The `driver` key of the controller configuration selects the
//! `MotorDriver` the supervisor talks to. Only `simulation` ships with this
//! crate; a hardware driver registers itself under its own name next to it.

use roboclaw_common::hal::driver::{DriverError, DriverFactory, MotorDriver};
use std::collections::HashMap;

/// Driver factories keyed by the name used in `ControllerConfig::driver`.
#[derive(Default)]
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the simulation driver.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Add `factory` under `name`.
    ///
    /// # Panics
    /// Registering the same name twice is a wiring bug and panics.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        let previous = self.factories.insert(name, factory);
        assert!(previous.is_none(), "driver '{name}' is already registered");
    }

    /// Factory registered under `name`, if any.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Build a fresh, uninitialized driver for `name`.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn MotorDriver>, DriverError> {
        self.get_factory(name)
            .map(|factory| factory())
            .ok_or_else(|| DriverError::DriverNotFound(name.to_string()))
    }

    /// Names of all registered drivers.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

//! Serialized access to the motor driver.

use parking_lot::{Mutex, MutexGuard};
use roboclaw_common::hal::driver::MotorDriver;

/// Owner of the single driver instance.
///
/// The board sits behind one serial link, so every caller goes through the
/// same lock.
pub struct DeviceBus {
    driver: Mutex<Box<dyn MotorDriver>>,
}

impl DeviceBus {
    /// Wrap an initialized driver.
    pub fn new(driver: Box<dyn MotorDriver>) -> Self {
        Self {
            driver: Mutex::new(driver),
        }
    }

    /// Take the bus for exclusive access.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn MotorDriver>> {
        self.driver.lock()
    }

    /// Name of the driver on the bus.
    pub fn driver_name(&self) -> &'static str {
        self.driver.lock().name()
    }
}

impl std::fmt::Debug for DeviceBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBus")
            .field("driver", &self.driver.try_lock().map(|d| d.name()))
            .finish()
    }
}

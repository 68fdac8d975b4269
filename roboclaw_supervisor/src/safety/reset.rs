//! Reset-and-wait recovery.
//!
//! 1. Claim the bus and mark the device disabled, then pulse the reset line.
//! 2. Release the bus and sleep for the board's boot time.
//! 3. Retake the bus, push encoder settings and re-enable the device.
//!    The push is retried `critical_read_repeats` times before giving up.
//!
//! Other callers observe `disabled` during step 2 and skip their I/O.

use crate::context::ControllerContext;
use roboclaw_common::hal::driver::DriverError;
use std::thread;
use tracing::{debug, error, info, warn};

/// Result of a reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Units were reset and reconfigured.
    Completed,
    /// Battery is low; nothing was done.
    SkippedBatteryLow,
    /// Another reset was already running; nothing was done.
    AlreadyInFlight,
    /// The driver failed during the reset. The device is enabled again.
    Failed(DriverError),
}

impl ControllerContext {
    /// Reset the units and wait for them to come back.
    pub fn reset_and_wait(&self) -> ResetOutcome {
        if self.safety().is_battery_low() {
            debug!("reset skipped, battery low");
            return ResetOutcome::SkippedBatteryLow;
        }

        {
            let mut driver = self.bus().lock();
            if !self.safety().begin_reset() {
                debug!("reset already in flight");
                return ResetOutcome::AlreadyInFlight;
            }
            info!("resetting motor controllers");
            if let Err(e) = driver.reset() {
                error!(error = %e, "hardware reset failed");
                self.safety().end_reset();
                return ResetOutcome::Failed(e);
            }
        }

        thread::sleep(self.config().gpio.reset_delay());

        let mut driver = self.bus().lock();
        let attempts = self.config().monitors.critical_read_repeats + 1;
        let mut pushed = driver.push_encoder_settings();
        for attempt in 2..=attempts {
            let Err(e) = &pushed else { break };
            warn!(error = %e, attempt, attempts, "retrying encoder settings push");
            pushed = driver.push_encoder_settings();
        }
        self.safety().end_reset();
        match pushed {
            Ok(()) => {
                info!("motor controllers reconfigured");
                ResetOutcome::Completed
            }
            Err(e) => {
                error!(error = %e, attempts, "failed to push encoder settings after reset");
                ResetOutcome::Failed(e)
            }
        }
    }
}

//! Fault register monitor.
//!
//! An abnormal reading is acted on only after `critical_read_repeats`
//! identical re-reads. Overcurrent triggers a reset; main battery low
//! lights the alarm, latches the battery-low flag and stops this monitor.
//! All other faults are only logged.

use super::monitor::{Monitor, MonitorState};
use crate::context::ControllerContext;
use crate::error::IoError;
use roboclaw_common::hal::types::{FaultPair, Indicator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Polls the fault registers of both units.
pub struct ErrorMonitor {
    ctx: Arc<ControllerContext>,
    interval: Duration,
    repeats: u32,
    state: MonitorState,
}

impl ErrorMonitor {
    /// Error monitor polling every `interval`.
    pub fn new(ctx: Arc<ControllerContext>, interval: Duration) -> Self {
        let repeats = ctx.config().monitors.critical_read_repeats;
        Self {
            ctx,
            interval,
            repeats,
            state: MonitorState::Running,
        }
    }

    fn read(&self) -> Result<FaultPair, IoError> {
        self.ctx.device_io(|d| d.read_fault_status())
    }

    /// True if every re-read matches `first`.
    fn confirm(&self, first: FaultPair) -> bool {
        for attempt in 1..=self.repeats {
            match self.read() {
                Ok(again) if again == first => {}
                Ok(again) => {
                    debug!(
                        attempt,
                        front = again.front.bits(),
                        rear = again.rear.bits(),
                        "fault reading changed, treating as transient"
                    );
                    return false;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "fault confirmation read failed");
                    return false;
                }
            }
        }
        true
    }
}

impl Monitor for ErrorMonitor {
    fn name(&self) -> &'static str {
        "error-monitor"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn state(&self) -> MonitorState {
        self.state
    }

    fn poll(&mut self) {
        if self.state.is_stopped() {
            return;
        }
        if self.ctx.safety().is_battery_low() {
            self.state = MonitorState::Stopped;
            return;
        }

        let faults = match self.read() {
            Ok(faults) => faults,
            Err(IoError::Disabled) => return,
            Err(e) => {
                debug!(error = %e, "fault status read failed");
                return;
            }
        };
        if faults.all(|f| f.is_normal()) || !self.confirm(faults) {
            return;
        }

        for (unit, status) in faults.iter().filter(|(_, s)| !s.is_normal()) {
            warn!(
                %unit,
                code = status.bits(),
                fault = %status.describe(),
                "motor controller fault confirmed"
            );
        }

        if faults.any(|f| f.has_overcurrent()) {
            warn!("overcurrent, resetting motor controllers");
            self.ctx.reset_and_wait();
        } else if faults.any(|f| f.has_main_battery_low()) {
            error!("main battery low, motor control disabled");
            self.ctx.set_indicator(Indicator::BatteryAlarm, true);
            self.ctx.safety().latch_battery_low();
            self.state = MonitorState::Stopped;
        }
    }
}

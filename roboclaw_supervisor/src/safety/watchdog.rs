//! Dead-man switch and idle reset.

use super::monitor::{Monitor, MonitorState};
use crate::context::ControllerContext;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Stops the motors when commands dry up and periodically resets idle units.
pub struct WatchdogMonitor {
    ctx: Arc<ControllerContext>,
    tick: Duration,
    state: MonitorState,
}

impl WatchdogMonitor {
    /// Watchdog polling at the configured tick.
    pub fn new(ctx: Arc<ControllerContext>) -> Self {
        let tick = ctx.config().monitors.watchdog_tick();
        Self {
            ctx,
            tick,
            state: MonitorState::Running,
        }
    }

    /// Check the deadlines as of `now`.
    pub fn poll_at(&mut self, now: Instant) {
        if self.state.is_stopped() {
            return;
        }
        if self.ctx.safety().is_battery_low() {
            info!("battery low, watchdog stopping");
            self.state = MonitorState::Stopped;
            return;
        }

        let due = self.ctx.safety().check_watchdogs_at(now);
        if due.stop {
            warn!("no motor command received in time, stopping motors");
            self.ctx.stop_motors("dead-man timeout");
        }
        if due.reset {
            info!("idle reset timeout elapsed");
            self.ctx.reset_and_wait();
        }
    }
}

impl Monitor for WatchdogMonitor {
    fn name(&self) -> &'static str {
        "watchdog"
    }

    fn interval(&self) -> Duration {
        self.tick
    }

    fn state(&self) -> MonitorState {
        self.state
    }

    fn poll(&mut self) {
        self.poll_at(Instant::now());
    }
}

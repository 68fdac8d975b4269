//! Temperature hysteresis monitor.
//!
//! Normal -> overheated when either unit reaches `temperature_critical`,
//! overheated -> normal when both fall below `temperature_drop`. Every
//! transition is set tentatively and kept only if the following
//! `critical_read_repeats` samples agree.

use super::monitor::{Monitor, MonitorState};
use crate::context::ControllerContext;
use roboclaw_common::hal::types::Temperatures;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Polls board temperatures and drives the overheated flag.
pub struct ThermalMonitor {
    ctx: Arc<ControllerContext>,
    interval: Duration,
    critical: u16,
    drop: u16,
    repeats: u32,
    state: MonitorState,
}

impl ThermalMonitor {
    /// Thermal monitor polling every `interval`.
    pub fn new(ctx: Arc<ControllerContext>, interval: Duration) -> Self {
        let monitors = ctx.config().monitors;
        Self {
            ctx,
            interval,
            critical: monitors.temperature_critical,
            drop: monitors.temperature_drop,
            repeats: monitors.critical_read_repeats,
            state: MonitorState::Running,
        }
    }

    fn read(&self) -> Option<Temperatures> {
        match self.ctx.device_io(|d| d.read_temperature()) {
            Ok(temps) => Some(temps),
            Err(e) => {
                debug!(error = %e, "temperature read skipped");
                None
            }
        }
    }

    fn check_overheat(&self, temps: Temperatures) {
        let critical = self.critical;
        if !temps.any(|t| *t >= critical) {
            return;
        }

        let safety = self.ctx.safety();
        safety.set_overheated(true);
        for _ in 0..self.repeats {
            match self.read() {
                Some(again) if again.all(|t| *t < critical) => {
                    debug!(front = again.front, rear = again.rear, "overheat was transient");
                    safety.set_overheated(false);
                    return;
                }
                Some(_) => {}
                None => {
                    safety.set_overheated(false);
                    return;
                }
            }
        }

        warn!(
            front = temps.front,
            rear = temps.rear,
            critical,
            "motor controllers overheated, stopping motors"
        );
        self.ctx.stop_motors("overheated");
    }

    fn check_cooldown(&self, temps: Temperatures) {
        let drop = self.drop;
        if !temps.all(|t| *t < drop) {
            return;
        }

        let safety = self.ctx.safety();
        safety.set_overheated(false);
        for _ in 0..self.repeats {
            match self.read() {
                Some(again) if again.any(|t| *t > drop) => {
                    debug!(front = again.front, rear = again.rear, "cool-down was transient");
                    safety.set_overheated(true);
                    return;
                }
                Some(_) => {}
                None => {
                    safety.set_overheated(true);
                    return;
                }
            }
        }

        info!(
            front = temps.front,
            rear = temps.rear,
            drop,
            "motor controllers cooled down, resetting"
        );
        self.ctx.reset_and_wait();
    }
}

impl Monitor for ThermalMonitor {
    fn name(&self) -> &'static str {
        "thermal-monitor"
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
        let safety = self.ctx.safety();
        if safety.is_battery_low() {
            self.state = MonitorState::Stopped;
            return;
        }
        if safety.is_disabled() {
            return;
        }

        let Some(temps) = self.read() else {
            return;
        };
        info!(front = temps.front, rear = temps.rear, "board temperatures [0.1 °C]");

        if safety.is_overheated() {
            self.check_cooldown(temps);
        } else {
            self.check_overheat(temps);
        }
    }
}

//! Battery voltage logger.

use super::monitor::{Monitor, MonitorState};
use crate::context::ControllerContext;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Reads the main battery voltage and logs it. Never stops.
pub struct BatteryMonitor {
    ctx: Arc<ControllerContext>,
    interval: Duration,
}

impl BatteryMonitor {
    /// Battery monitor polling every `interval`.
    pub fn new(ctx: Arc<ControllerContext>, interval: Duration) -> Self {
        Self { ctx, interval }
    }
}

impl Monitor for BatteryMonitor {
    fn name(&self) -> &'static str {
        "battery-monitor"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn state(&self) -> MonitorState {
        MonitorState::Running
    }

    fn poll(&mut self) {
        if self.ctx.safety().is_disabled() {
            return;
        }
        match self.ctx.device_io(|d| d.read_bus_voltage()) {
            Ok(voltage) => info!("main battery: {:.1} V", f64::from(voltage) / 10.0),
            Err(e) => debug!(error = %e, "battery voltage read skipped"),
        }
    }
}

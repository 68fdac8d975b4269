//! Supervisor assembly.
//!
//! Creates and initializes the driver, builds the shared context, spawns the
//! monitors and hands the message pipe to the dispatcher.

use crate::context::ControllerContext;
use crate::dispatch::Dispatcher;
use crate::error::{SupervisorError, TransportError};
use crate::safety::{
    BatteryMonitor, ErrorMonitor, Monitor, ThermalMonitor, WatchdogMonitor, spawn_monitor,
};
use crate::transport::PipeTransport;
use roboclaw_common::hal::config::ControllerConfig;
use roboclaw_common::hal::types::Indicator;
use roboclaw_hal::DriverRegistry;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::info;

/// Running supervisor for one board.
pub struct Supervisor {
    ctx: Arc<ControllerContext>,
    monitors: Vec<JoinHandle<()>>,
}

impl Supervisor {
    /// Validate `config`, create and initialize its driver, and prepare the
    /// board: watchdogs armed, activity LED on, battery alarm off.
    ///
    /// # Errors
    /// `SupervisorError::Config` on invalid configuration,
    /// `SupervisorError::Driver` if the driver is unknown or fails to init.
    pub fn new(config: ControllerConfig, registry: &DriverRegistry) -> Result<Self, SupervisorError> {
        config.validate()?;

        let mut driver = registry.create_driver(&config.driver)?;
        info!(
            "Using driver '{}' v{}",
            driver.name(),
            driver.version()
        );
        driver.init(&config)?;

        let ctx = Arc::new(ControllerContext::new(config, driver));
        ctx.safety().arm_watchdogs();
        ctx.set_indicator(Indicator::Activity, true);
        ctx.set_indicator(Indicator::BatteryAlarm, false);

        Ok(Self {
            ctx,
            monitors: Vec::new(),
        })
    }

    /// Shared controller context.
    pub fn context(&self) -> &Arc<ControllerContext> {
        &self.ctx
    }

    /// Dispatcher bound to this supervisor's context.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.ctx))
    }

    /// Spawn the watchdog and every monitor with a non-zero interval.
    ///
    /// # Errors
    /// `SupervisorError::Spawn` if a thread cannot be created.
    pub fn start_monitors(&mut self) -> Result<(), SupervisorError> {
        let monitors = self.ctx.config().monitors;

        self.spawn(WatchdogMonitor::new(Arc::clone(&self.ctx)))?;
        if let Some(interval) = monitors.battery_interval() {
            self.spawn(BatteryMonitor::new(Arc::clone(&self.ctx), interval))?;
        }
        if let Some(interval) = monitors.error_interval() {
            self.spawn(ErrorMonitor::new(Arc::clone(&self.ctx), interval))?;
        }
        if let Some(interval) = monitors.temperature_interval() {
            self.spawn(ThermalMonitor::new(Arc::clone(&self.ctx), interval))?;
        }

        info!("{} monitor(s) running", self.monitors.len());
        Ok(())
    }

    /// Number of monitor threads spawned.
    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    /// Serve the message pipe on the calling thread until it closes.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<(), TransportError> {
        PipeTransport::new(reader, writer).run(&self.dispatcher())
    }

    fn spawn<M: Monitor + 'static>(&mut self, monitor: M) -> Result<(), SupervisorError> {
        let name = monitor.name();
        let handle =
            spawn_monitor(monitor).map_err(|source| SupervisorError::Spawn { name, source })?;
        self.monitors.push(handle);
        Ok(())
    }
}

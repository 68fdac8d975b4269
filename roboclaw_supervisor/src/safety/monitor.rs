//! Periodic monitor abstraction.
//!
//! Each monitor is a two-state machine: `Running` until its permanent stop
//! condition is met, then `Stopped` for good. `spawn_monitor` drives one
//! monitor on its own named thread.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::info;

/// Lifecycle of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Polling on every interval.
    Running,
    /// Stopped permanently; `poll` does nothing.
    Stopped,
}

impl MonitorState {
    /// True once the monitor has stopped.
    #[inline]
    pub const fn is_stopped(&self) -> bool {
        matches!(self, MonitorState::Stopped)
    }
}

/// A periodic safety check.
pub trait Monitor: Send {
    /// Thread and log name.
    fn name(&self) -> &'static str;

    /// Time between polls.
    fn interval(&self) -> Duration;

    /// Current lifecycle state.
    fn state(&self) -> MonitorState;

    /// Run one check. A no-op once stopped.
    fn poll(&mut self);
}

/// Run `monitor` on a dedicated thread until it stops.
pub fn spawn_monitor<M: Monitor + 'static>(mut monitor: M) -> io::Result<JoinHandle<()>> {
    let name = monitor.name();
    thread::Builder::new().name(name.to_string()).spawn(move || {
        info!(
            monitor = name,
            interval_ms = monitor.interval().as_millis() as u64,
            "monitor started"
        );
        while !monitor.state().is_stopped() {
            thread::sleep(monitor.interval());
            monitor.poll();
        }
        info!(monitor = name, "monitor stopped permanently");
    })
}

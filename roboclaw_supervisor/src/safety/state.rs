//! Shared safety state.
//!
//! Three flags observed by every monitor and by the dispatcher, plus the
//! watchdog deadlines. Each flag is an atomic; the deadlines live behind a
//! single lock so a stop deadline is never seen apart from its armed bit.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Watchdog deadlines, always read and written together.
#[derive(Debug, Clone, Copy)]
struct Deadlines {
    motors_stop: Instant,
    stop_armed: bool,
    reset: Instant,
}

/// Actions the watchdog found due on a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchdogDue {
    /// Dead-man timeout elapsed; motors must be stopped.
    pub stop: bool,
    /// Idle reset timeout elapsed; the units must be reset.
    pub reset: bool,
}

/// Safety flags and watchdog deadlines shared by all monitors.
#[derive(Debug)]
pub struct SafetyState {
    disabled: AtomicBool,
    overheated: AtomicBool,
    battery_low: AtomicBool,
    stop_idle_timeout: Duration,
    reset_idle_timeout: Duration,
    deadlines: Mutex<Deadlines>,
}

impl SafetyState {
    /// State with all flags clear and the watchdogs armed from `now`.
    pub fn new(stop_idle_timeout: Duration, reset_idle_timeout: Duration, now: Instant) -> Self {
        Self {
            disabled: AtomicBool::new(false),
            overheated: AtomicBool::new(false),
            battery_low: AtomicBool::new(false),
            stop_idle_timeout,
            reset_idle_timeout,
            deadlines: Mutex::new(Deadlines {
                motors_stop: now + stop_idle_timeout,
                stop_armed: true,
                reset: now + reset_idle_timeout,
            }),
        }
    }

    /// True while a reset is in flight.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// True while the units are considered overheated.
    #[inline]
    pub fn is_overheated(&self) -> bool {
        self.overheated.load(Ordering::Acquire)
    }

    /// True once the main battery was confirmed low. Never cleared.
    #[inline]
    pub fn is_battery_low(&self) -> bool {
        self.battery_low.load(Ordering::Acquire)
    }

    /// Set or clear the overheated flag.
    pub fn set_overheated(&self, overheated: bool) {
        self.overheated.store(overheated, Ordering::Release);
    }

    /// Latch the battery-low flag. Returns true on the first call.
    pub fn latch_battery_low(&self) -> bool {
        !self.battery_low.swap(true, Ordering::AcqRel)
    }

    /// Claim the reset. Returns false if another reset is already in flight.
    pub(crate) fn begin_reset(&self) -> bool {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Release the reset claimed by [`begin_reset`](Self::begin_reset).
    pub(crate) fn end_reset(&self) {
        self.disabled.store(false, Ordering::Release);
    }

    /// Re-arm both watchdog deadlines from now.
    pub fn arm_watchdogs(&self) {
        self.arm_watchdogs_at(Instant::now());
    }

    /// Re-arm both watchdog deadlines from `now`.
    pub fn arm_watchdogs_at(&self, now: Instant) {
        let mut deadlines = self.deadlines.lock();
        deadlines.motors_stop = now + self.stop_idle_timeout;
        deadlines.stop_armed = true;
        deadlines.reset = now + self.reset_idle_timeout;
    }

    /// Check both deadlines at `now`.
    ///
    /// An elapsed stop deadline disarms itself until the next
    /// [`arm_watchdogs_at`](Self::arm_watchdogs_at). An elapsed reset
    /// deadline is pushed one `reset_idle_timeout` past `now`.
    pub fn check_watchdogs_at(&self, now: Instant) -> WatchdogDue {
        let mut deadlines = self.deadlines.lock();
        let mut due = WatchdogDue::default();
        if deadlines.stop_armed && now >= deadlines.motors_stop {
            deadlines.stop_armed = false;
            due.stop = true;
        }
        if now >= deadlines.reset {
            deadlines.reset = now + self.reset_idle_timeout;
            due.reset = true;
        }
        due
    }
}

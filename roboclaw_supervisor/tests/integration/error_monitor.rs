//! Integration test: fault register confirmation and escalation.

use super::support::{both, failed, harness, test_config};
use roboclaw_common::hal::types::{FaultPair, FaultStatus, Indicator, MotorsSpeed};
use roboclaw_supervisor::safety::{ErrorMonitor, Monitor, MonitorState};
use roboclaw_supervisor::{ClientMessage, Dispatcher};
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(10);

#[test]
fn normal_status_reads_once() {
    let (ctx, script) = harness(test_config(3));
    let mut monitor = ErrorMonitor::new(ctx, INTERVAL);

    monitor.poll();

    let calls = script.lock().calls;
    assert_eq!(calls.read_faults, 1);
    assert_eq!(calls.reset, 0);
}

#[test]
fn transient_fault_takes_no_action() {
    let (ctx, script) = harness(test_config(2));
    script
        .lock()
        .queue_faults([both(FaultStatus::M1_OVERCURRENT), FaultPair::default()]);
    let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

    monitor.poll();

    let calls = script.lock().calls;
    assert_eq!(calls.read_faults, 2);
    assert_eq!(calls.reset, 0);
    assert_eq!(monitor.state(), MonitorState::Running);
}

#[test]
fn changed_fault_code_is_transient() {
    let (ctx, script) = harness(test_config(2));
    script.lock().queue_faults([
        both(FaultStatus::M1_OVERCURRENT),
        both(FaultStatus::M1_OVERCURRENT),
        both(FaultStatus::M2_OVERCURRENT),
    ]);
    let mut monitor = ErrorMonitor::new(ctx, INTERVAL);

    monitor.poll();

    assert_eq!(script.lock().calls.reset, 0);
}

#[test]
fn failed_confirmation_read_cancels() {
    let (ctx, script) = harness(test_config(2));
    {
        let mut script = script.lock();
        script.faults.push_back(Ok(both(FaultStatus::M1_OVERCURRENT)));
        script.faults.push_back(failed());
    }
    let mut monitor = ErrorMonitor::new(ctx, INTERVAL);

    monitor.poll();

    assert_eq!(script.lock().calls.reset, 0);
}

#[test]
fn read_error_skips_tick() {
    let (ctx, script) = harness(test_config(2));
    script.lock().faults.push_back(failed());
    let mut monitor = ErrorMonitor::new(ctx, INTERVAL);

    monitor.poll();

    let calls = script.lock().calls;
    assert_eq!(calls.read_faults, 1);
    assert_eq!(calls.reset, 0);
    assert_eq!(monitor.state(), MonitorState::Running);
}

#[test]
fn confirmed_overcurrent_resets_once() {
    let (ctx, script) = harness(test_config(2));
    {
        let mut script = script.lock();
        let overcurrent = FaultPair::new(FaultStatus::M2_OVERCURRENT, FaultStatus::NORMAL);
        script.queue_faults([overcurrent; 3]);
    }
    let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

    monitor.poll();
    monitor.poll();

    let calls = script.lock().calls;
    assert_eq!(calls.reset, 1);
    assert_eq!(calls.push_settings, 1);
    assert_eq!(calls.read_faults, 4);
    assert!(!ctx.safety().is_disabled());
    assert_eq!(monitor.state(), MonitorState::Running);
}

#[test]
fn zero_repeats_acts_on_first_reading() {
    let (ctx, script) = harness(test_config(0));
    script
        .lock()
        .queue_faults([both(FaultStatus::M1_OVERCURRENT)]);
    let mut monitor = ErrorMonitor::new(ctx, INTERVAL);

    monitor.poll();

    let calls = script.lock().calls;
    assert_eq!(calls.read_faults, 1);
    assert_eq!(calls.reset, 1);
}

#[test]
fn overcurrent_takes_precedence_over_battery_low() {
    let (ctx, script) = harness(test_config(1));
    let mixed = FaultPair::new(FaultStatus::M1_OVERCURRENT, FaultStatus::MAIN_BATTERY_LOW);
    script.lock().queue_faults([mixed; 2]);
    let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

    monitor.poll();

    assert_eq!(script.lock().calls.reset, 1);
    assert!(!ctx.safety().is_battery_low());
}

#[test]
fn other_faults_are_only_logged() {
    for fault in [
        FaultStatus::E_STOP,
        FaultStatus::TEMPERATURE,
        FaultStatus::MAIN_BATTERY_HIGH,
        FaultStatus::LOGIC_BATTERY_HIGH,
        FaultStatus::LOGIC_BATTERY_LOW,
    ] {
        let (ctx, script) = harness(test_config(1));
        script.lock().queue_faults([both(fault); 2]);
        let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

        monitor.poll();

        let script = script.lock();
        assert_eq!(script.calls.reset, 0, "{fault:?}");
        assert_eq!(script.calls.stop, 0, "{fault:?}");
        assert!(!ctx.safety().is_battery_low(), "{fault:?}");
        assert_eq!(monitor.state(), MonitorState::Running);
    }
}

#[test]
fn confirmed_battery_low_shuts_down() {
    let (ctx, script) = harness(test_config(2));
    script
        .lock()
        .queue_faults([both(FaultStatus::MAIN_BATTERY_LOW); 3]);
    let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

    monitor.poll();

    assert!(ctx.safety().is_battery_low());
    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert!(script.lock().indicator(Indicator::BatteryAlarm));

    // Stopped for good: no further polling.
    monitor.poll();
    assert_eq!(script.lock().calls.read_faults, 3);

    // Commands are dropped without device I/O, and no reset runs.
    let dispatcher = Dispatcher::new(Arc::clone(&ctx));
    let mut sink = super::support::CapturedResponses::default();
    dispatcher.on_message(
        1,
        None,
        ClientMessage::MotorsCommand(MotorsSpeed::uniform(100)),
        &mut sink,
    );
    assert_eq!(script.lock().calls.send_speed, 0);
    assert_eq!(
        ctx.reset_and_wait(),
        roboclaw_supervisor::safety::ResetOutcome::SkippedBatteryLow
    );
    assert_eq!(script.lock().calls.reset, 0);
}

#[test]
fn stops_when_battery_low_latched_elsewhere() {
    let (ctx, script) = harness(test_config(0));
    ctx.safety().latch_battery_low();
    let mut monitor = ErrorMonitor::new(Arc::clone(&ctx), INTERVAL);

    monitor.poll();

    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert_eq!(script.lock().calls.read_faults, 0);
}

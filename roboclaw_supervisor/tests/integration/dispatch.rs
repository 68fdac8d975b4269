//! Integration test: speed queries, speed commands and client death.

use super::support::{CapturedResponses, ScriptHandle, failed, harness, test_config};
use roboclaw_common::hal::types::{Indicator, MotorsSpeed};
use roboclaw_supervisor::{ClientMessage, Dispatcher};
use std::sync::Arc;

fn dispatcher(repeats: u32) -> (Dispatcher, ScriptHandle) {
    let (ctx, script) = harness(test_config(repeats));
    (Dispatcher::new(ctx), script)
}

#[test]
fn query_without_sequence_number_is_dropped() {
    let (dispatcher, script) = dispatcher(2);
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(4, None, ClientMessage::CurrentSpeedRequest, &mut sink);

    assert!(sink.sent.is_empty());
    assert_eq!(script.lock().calls.read_speed, 0);
}

#[test]
fn query_reports_physical_speed_with_ack() {
    let (dispatcher, script) = dispatcher(0);
    script.lock().idle_speed = MotorsSpeed {
        front_left: 1865,
        front_right: -1865,
        rear_left: 0,
        rear_right: 3730,
    };
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(4, Some(99), ClientMessage::CurrentSpeedRequest, &mut sink);

    assert_eq!(
        sink.sent,
        vec![(
            4,
            99,
            MotorsSpeed {
                front_left: 377,
                front_right: -377,
                rear_left: 0,
                rear_right: 754,
            }
        )]
    );
}

#[test]
fn query_retries_failed_reads() {
    let (dispatcher, script) = dispatcher(2);
    {
        let mut script = script.lock();
        script.speeds.push_back(failed());
        script.speeds.push_back(failed());
        script.speeds.push_back(Ok(MotorsSpeed::uniform(1865)));
    }
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(1, Some(7), ClientMessage::CurrentSpeedRequest, &mut sink);

    assert_eq!(sink.sent, vec![(1, 7, MotorsSpeed::uniform(377))]);
    assert_eq!(script.lock().calls.read_speed, 3);
}

#[test]
fn query_reports_zero_when_reads_keep_failing() {
    let (dispatcher, script) = dispatcher(1);
    {
        let mut script = script.lock();
        script.idle_speed = MotorsSpeed::uniform(1865);
        script.speeds.push_back(failed());
        script.speeds.push_back(failed());
    }
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(1, Some(8), ClientMessage::CurrentSpeedRequest, &mut sink);

    assert_eq!(sink.sent, vec![(1, 8, MotorsSpeed::ZERO)]);
    assert_eq!(script.lock().calls.read_speed, 2);
}

#[test]
fn command_is_converted_to_device_units() {
    let (dispatcher, script) = dispatcher(0);
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(
        2,
        None,
        ClientMessage::MotorsCommand(MotorsSpeed {
            front_left: 377,
            front_right: 377,
            rear_left: -377,
            rear_right: 0,
        }),
        &mut sink,
    );

    assert_eq!(
        script.lock().sent,
        vec![MotorsSpeed {
            front_left: 1865,
            front_right: 1865,
            rear_left: -1865,
            rear_right: 0,
        }]
    );
    assert!(sink.sent.is_empty());
}

#[test]
fn failed_command_is_dropped_without_retry() {
    let (dispatcher, script) = dispatcher(3);
    script.lock().fail_send = true;
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(
        2,
        None,
        ClientMessage::MotorsCommand(MotorsSpeed::uniform(100)),
        &mut sink,
    );

    let script = script.lock();
    assert_eq!(script.calls.send_speed, 1);
    assert!(script.sent.is_empty());
}

#[test]
fn commands_dropped_once_battery_low() {
    let (ctx, script) = harness(test_config(0));
    let dispatcher = Dispatcher::new(Arc::clone(&ctx));
    ctx.safety().latch_battery_low();
    let mut sink = CapturedResponses::default();

    for _ in 0..3 {
        dispatcher.on_message(
            2,
            None,
            ClientMessage::MotorsCommand(MotorsSpeed::uniform(100)),
            &mut sink,
        );
    }

    assert_eq!(script.lock().calls.send_speed, 0);
}

#[test]
fn client_death_stops_motors_immediately() {
    let (ctx, script) = harness(test_config(0));
    let dispatcher = Dispatcher::new(Arc::clone(&ctx));
    ctx.safety().arm_watchdogs();

    dispatcher.on_client_died(6);

    assert_eq!(script.lock().calls.stop, 1);
}

#[test]
fn activity_indicator_blinks_per_message() {
    let (dispatcher, script) = dispatcher(0);
    let mut sink = CapturedResponses::default();

    dispatcher.on_message(1, Some(1), ClientMessage::CurrentSpeedRequest, &mut sink);

    let script = script.lock();
    assert_eq!(script.indicator_writes, 2);
    assert!(!script.indicator(Indicator::Activity));
}

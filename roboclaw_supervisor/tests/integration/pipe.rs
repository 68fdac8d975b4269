//! Integration test: JSON line pipe end to end.

use super::support::{harness, test_config};
use roboclaw_common::hal::types::MotorsSpeed;
use roboclaw_supervisor::Dispatcher;
use roboclaw_supervisor::transport::{OutboundFrame, PipeTransport, ServerMessage};
use std::io::Cursor;

const INPUT: &str = r#"{"kind":"data","client_id":2,"message":{"type":"motors_command","front_left":377,"front_right":377,"rear_left":377,"rear_right":377}}
{"kind":"data","client_id":2,"syn_num":11,"message":{"type":"current_speed_request"}}

this is not a frame
{"kind":"data","client_id":2,"message":{"type":"current_speed_request"}}
{"kind":"client_died","client_id":2}
"#;

#[test]
fn pipe_dispatches_frames_until_eof() {
    let (ctx, script) = harness(test_config(0));
    script.lock().idle_speed = MotorsSpeed::uniform(1865);
    let dispatcher = Dispatcher::new(ctx);

    let mut transport = PipeTransport::new(Cursor::new(INPUT), Vec::new());
    transport.run(&dispatcher).unwrap();
    let output = String::from_utf8(transport.into_writer()).unwrap();

    let frames: Vec<OutboundFrame> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        frames,
        vec![OutboundFrame::Data {
            client_id: 2,
            ack_num: 11,
            message: ServerMessage::CurrentSpeed(MotorsSpeed::uniform(377)),
        }]
    );

    let script = script.lock();
    assert_eq!(script.sent, vec![MotorsSpeed::uniform(1865)]);
    // Client death and end of pipe.
    assert_eq!(script.calls.stop, 2);
}

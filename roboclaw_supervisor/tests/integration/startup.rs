//! Integration test: supervisor startup against the simulation driver.

use roboclaw_common::config::{ConfigError, ConfigLoader};
use roboclaw_common::hal::config::ControllerConfig;
use roboclaw_common::hal::driver::DriverError;
use roboclaw_hal::DriverRegistry;
use roboclaw_supervisor::transport::OutboundFrame;
use roboclaw_supervisor::{Supervisor, SupervisorError};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

#[test]
fn starts_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
driver = "simulation"

[gpio]
reset_delay_ms = 0

[monitors]
battery_interval_ms = 50
error_interval_ms = 50
temperature_interval_ms = 50
critical_read_repeats = 2
"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = ControllerConfig::load(file.path()).unwrap();
    let mut supervisor = Supervisor::new(config, &DriverRegistry::with_builtin_drivers()).unwrap();
    supervisor.start_monitors().unwrap();
    assert_eq!(supervisor.monitor_count(), 4);

    let input = concat!(
        r#"{"kind":"data","client_id":1,"message":{"type":"motors_command","front_left":100,"front_right":100,"rear_left":100,"rear_right":100}}"#,
        "\n",
        r#"{"kind":"data","client_id":1,"syn_num":5,"message":{"type":"current_speed_request"}}"#,
        "\n",
    );
    let mut output = Vec::new();
    supervisor.serve(Cursor::new(input), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    let frames: Vec<OutboundFrame> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(frames.len(), 1);
    let OutboundFrame::Data { ack_num, .. } = frames[0];
    assert_eq!(ack_num, 5);
}

#[test]
fn disabled_monitors_are_not_spawned() {
    let mut supervisor = Supervisor::new(
        ControllerConfig::default(),
        &DriverRegistry::with_builtin_drivers(),
    )
    .unwrap();
    supervisor.start_monitors().unwrap();
    assert_eq!(supervisor.monitor_count(), 1);
    assert!(!supervisor.context().safety().is_battery_low());
}

#[test]
fn unknown_driver_is_fatal() {
    let mut config = ControllerConfig::default();
    config.driver = "serial".to_string();
    let result = Supervisor::new(config, &DriverRegistry::with_builtin_drivers());
    assert!(matches!(
        result,
        Err(SupervisorError::Driver(DriverError::DriverNotFound(_)))
    ));
}

#[test]
fn invalid_config_is_fatal() {
    let mut config = ControllerConfig::default();
    config.motors.wheel_radius_mm = 0;
    let result = Supervisor::new(config, &DriverRegistry::with_builtin_drivers());
    assert!(matches!(
        result,
        Err(SupervisorError::Config(ConfigError::ValidationError(_)))
    ));
}

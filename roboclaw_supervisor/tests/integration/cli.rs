//! Integration test: command-line exit codes of the supervisor binary.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

fn supervisor() -> Command {
    Command::new(env!("CARGO_BIN_EXE_roboclaw_supervisor"))
}

#[test]
fn missing_arguments_exit_with_status_one() {
    let output = supervisor().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
    assert!(output.stdout.is_empty());
}

#[test]
fn help_exits_successfully() {
    let output = supervisor().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn misspelled_config_key_is_fatal() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[monitors]\ntemperature_monitor_interval = 500").unwrap();
    let logging = NamedTempFile::new().unwrap();

    let output = supervisor()
        .arg(config.path())
        .arg(logging.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown field"), "stderr: {stderr}");
}

//! Scripted driver and helpers shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use roboclaw_common::hal::config::ControllerConfig;
use roboclaw_common::hal::driver::{DriverError, MotorDriver};
use roboclaw_common::hal::types::{
    ClientId, FaultPair, FaultStatus, Indicator, MotorsSpeed, Temperatures,
};
use roboclaw_supervisor::dispatch::SeqNum;
use roboclaw_supervisor::{ControllerContext, ResponseSink, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Number of calls per driver primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub reset: u32,
    pub push_settings: u32,
    pub stop: u32,
    pub send_speed: u32,
    pub read_speed: u32,
    pub read_voltage: u32,
    pub read_faults: u32,
    pub read_temperature: u32,
}

/// Readings the driver returns, and what it was asked to do.
///
/// Queued readings are consumed first; once a queue is empty the matching
/// `idle_*` value is returned.
#[derive(Debug, Default)]
pub struct Script {
    pub faults: VecDeque<Result<FaultPair, DriverError>>,
    pub idle_faults: FaultPair,
    pub temperatures: VecDeque<Result<Temperatures, DriverError>>,
    pub idle_temperature: Temperatures,
    pub speeds: VecDeque<Result<MotorsSpeed, DriverError>>,
    pub idle_speed: MotorsSpeed,
    pub voltage: u16,
    pub fail_send: bool,
    /// Number of upcoming encoder settings pushes that fail.
    pub failing_pushes: u32,
    pub sent: Vec<MotorsSpeed>,
    pub indicators: HashMap<Indicator, bool>,
    pub indicator_writes: u32,
    pub calls: Calls,
}

impl Script {
    pub fn queue_faults(&mut self, readings: impl IntoIterator<Item = FaultPair>) {
        self.faults.extend(readings.into_iter().map(Ok));
    }

    pub fn queue_temperatures(&mut self, readings: impl IntoIterator<Item = (u16, u16)>) {
        self.temperatures.extend(
            readings
                .into_iter()
                .map(|(front, rear)| Ok(Temperatures::new(front, rear))),
        );
    }

    pub fn indicator(&self, indicator: Indicator) -> bool {
        self.indicators.get(&indicator).copied().unwrap_or(false)
    }
}

pub type ScriptHandle = Arc<Mutex<Script>>;

/// `MotorDriver` answering from a shared [`Script`].
pub struct ScriptedDriver {
    script: ScriptHandle,
}

impl ScriptedDriver {
    pub fn new(script: ScriptHandle) -> Self {
        Self { script }
    }
}

fn comm_error() -> DriverError {
    DriverError::Communication("scripted failure".to_string())
}

impl MotorDriver for ScriptedDriver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn version(&self) -> &'static str {
        "0.0.0"
    }

    fn init(&mut self, _config: &ControllerConfig) -> Result<(), DriverError> {
        Ok(())
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), DriverError> {
        let mut script = self.script.lock();
        script.indicators.insert(indicator, on);
        script.indicator_writes += 1;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DriverError> {
        let mut script = self.script.lock();
        script.calls.reset += 1;
        script.idle_faults = FaultPair::default();
        Ok(())
    }

    fn push_encoder_settings(&mut self) -> Result<(), DriverError> {
        let mut script = self.script.lock();
        script.calls.push_settings += 1;
        if script.failing_pushes > 0 {
            script.failing_pushes -= 1;
            return Err(comm_error());
        }
        Ok(())
    }

    fn stop_motors(&mut self) -> Result<(), DriverError> {
        self.script.lock().calls.stop += 1;
        Ok(())
    }

    fn send_speed(&mut self, speed: MotorsSpeed) -> Result<(), DriverError> {
        let mut script = self.script.lock();
        script.calls.send_speed += 1;
        if script.fail_send {
            return Err(comm_error());
        }
        script.sent.push(speed);
        Ok(())
    }

    fn read_speed(&mut self) -> Result<MotorsSpeed, DriverError> {
        let mut script = self.script.lock();
        script.calls.read_speed += 1;
        let idle = script.idle_speed;
        script.speeds.pop_front().unwrap_or(Ok(idle))
    }

    fn read_bus_voltage(&mut self) -> Result<u16, DriverError> {
        let mut script = self.script.lock();
        script.calls.read_voltage += 1;
        Ok(script.voltage)
    }

    fn read_fault_status(&mut self) -> Result<FaultPair, DriverError> {
        let mut script = self.script.lock();
        script.calls.read_faults += 1;
        let idle = script.idle_faults;
        script.faults.pop_front().unwrap_or(Ok(idle))
    }

    fn read_temperature(&mut self) -> Result<Temperatures, DriverError> {
        let mut script = self.script.lock();
        script.calls.read_temperature += 1;
        let idle = script.idle_temperature;
        script.temperatures.pop_front().unwrap_or(Ok(idle))
    }
}

/// Configuration with an instant reset and `repeats` confirmation reads.
pub fn test_config(repeats: u32) -> ControllerConfig {
    let mut config = ControllerConfig::default();
    config.gpio.reset_delay_ms = 0;
    config.monitors.critical_read_repeats = repeats;
    config
}

/// Context over a scripted driver.
pub fn harness(config: ControllerConfig) -> (Arc<ControllerContext>, ScriptHandle) {
    let script = ScriptHandle::default();
    let driver = Box::new(ScriptedDriver::new(Arc::clone(&script)));
    (Arc::new(ControllerContext::new(config, driver)), script)
}

pub fn failed<T>() -> Result<T, DriverError> {
    Err(comm_error())
}

pub fn both(status: FaultStatus) -> FaultPair {
    FaultPair::new(status, status)
}

/// Captures speed reports in memory.
#[derive(Debug, Default)]
pub struct CapturedResponses {
    pub sent: Vec<(ClientId, SeqNum, MotorsSpeed)>,
}

impl ResponseSink for CapturedResponses {
    fn send_speed(
        &mut self,
        client_id: ClientId,
        ack_num: SeqNum,
        speed: MotorsSpeed,
    ) -> Result<(), TransportError> {
        self.sent.push((client_id, ack_num, speed));
        Ok(())
    }
}

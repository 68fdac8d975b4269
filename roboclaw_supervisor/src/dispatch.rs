//! Command and query dispatcher.
//!
//! Turns decoded pipe messages into device calls and speed reports. Device
//! failures never reach the client: queries fall back to zero speed and
//! commands are dropped.

use crate::context::ControllerContext;
use crate::error::{IoError, TransportError};
use roboclaw_common::hal::types::{ClientId, Indicator, MotorsSpeed};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Sequence number carried by queries and echoed as acknowledgment.
pub type SeqNum = u32;

/// Messages a client can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for the current wheel speeds.
    CurrentSpeedRequest,
    /// Drive the wheels [mm/s].
    MotorsCommand(MotorsSpeed),
}

/// Destination of speed reports.
pub trait ResponseSink {
    /// Send the current wheel speeds [mm/s] to `client_id`.
    fn send_speed(
        &mut self,
        client_id: ClientId,
        ack_num: SeqNum,
        speed: MotorsSpeed,
    ) -> Result<(), TransportError>;
}

/// Handles inbound messages against the shared controller context.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Arc<ControllerContext>,
}

impl Dispatcher {
    /// Dispatcher over `ctx`.
    pub fn new(ctx: Arc<ControllerContext>) -> Self {
        Self { ctx }
    }

    /// Handle a data message from `client_id`.
    pub fn on_message(
        &self,
        client_id: ClientId,
        syn_num: Option<SeqNum>,
        message: ClientMessage,
        sink: &mut dyn ResponseSink,
    ) {
        self.ctx.set_indicator(Indicator::Activity, true);
        match message {
            ClientMessage::CurrentSpeedRequest => self.on_speed_query(client_id, syn_num, sink),
            ClientMessage::MotorsCommand(speed) => self.on_speed_command(client_id, speed),
        }
        self.ctx.set_indicator(Indicator::Activity, false);
    }

    /// Handle the death of `client_id`: stop the motors at once.
    pub fn on_client_died(&self, client_id: ClientId) {
        warn!(client_id, "client died, stopping motors");
        self.ctx.stop_motors("client died");
    }

    /// Handle the end of the inbound pipe.
    pub fn on_pipe_closed(&self) {
        info!("message pipe closed, stopping motors");
        self.ctx.stop_motors("pipe closed");
    }

    fn on_speed_query(
        &self,
        client_id: ClientId,
        syn_num: Option<SeqNum>,
        sink: &mut dyn ResponseSink,
    ) {
        let Some(syn_num) = syn_num else {
            warn!(client_id, "speed query without sequence number dropped");
            return;
        };

        let speed = self.ctx.units().speed_to_physical(self.read_speed());
        trace!(client_id, syn_num, ?speed, "speed report");
        if let Err(e) = sink.send_speed(client_id, syn_num, speed) {
            warn!(client_id, error = %e, "failed to send speed report");
        }
    }

    /// Current wheel speeds [pulses/s], zero while disabled or unreadable.
    fn read_speed(&self) -> MotorsSpeed {
        let repeats = self.ctx.config().monitors.critical_read_repeats;
        for attempt in 0..=repeats {
            match self.ctx.device_io(|d| d.read_speed()) {
                Ok(speed) => return speed,
                Err(IoError::Disabled) => return MotorsSpeed::ZERO,
                Err(e) => debug!(attempt, error = %e, "speed read failed"),
            }
        }
        warn!("speed read failed {} times, reporting zero", repeats + 1);
        MotorsSpeed::ZERO
    }

    fn on_speed_command(&self, client_id: ClientId, speed: MotorsSpeed) {
        let safety = self.ctx.safety();
        if safety.is_battery_low() {
            trace!(client_id, "battery low, command dropped");
            return;
        }

        safety.arm_watchdogs();
        let device_speed = self.ctx.units().speed_to_device(speed);
        match self.ctx.device_io(|d| d.send_speed(device_speed)) {
            Ok(()) => trace!(client_id, ?device_speed, "speed command sent"),
            Err(IoError::Disabled) => debug!(client_id, "reset in flight, command dropped"),
            Err(e) => debug!(client_id, error = %e, "speed command dropped"),
        }
    }
}

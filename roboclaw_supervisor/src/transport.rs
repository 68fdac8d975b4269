//! Newline-delimited JSON message pipe.
//!
//! Inbound frames:
//!
//! ```json
//! {"kind":"data","client_id":3,"syn_num":17,"message":{"type":"current_speed_request"}}
//! {"kind":"data","client_id":3,"message":{"type":"motors_command","front_left":100,"front_right":100,"rear_left":100,"rear_right":100}}
//! {"kind":"client_died","client_id":3}
//! ```
//!
//! Outbound frames:
//!
//! ```json
//! {"kind":"data","client_id":3,"ack_num":17,"message":{"type":"current_speed","front_left":98,...}}
//! ```

use crate::dispatch::{ClientMessage, Dispatcher, ResponseSink, SeqNum};
use crate::error::TransportError;
use roboclaw_common::hal::types::{ClientId, MotorsSpeed};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Frame received from the pipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundFrame {
    /// Message from a client.
    Data {
        /// Sender.
        client_id: ClientId,
        /// Sequence number, required for queries.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        syn_num: Option<SeqNum>,
        /// Payload.
        message: ClientMessage,
    },
    /// A client disconnected.
    ClientDied {
        /// Client that died.
        client_id: ClientId,
    },
}

impl InboundFrame {
    /// Decode one line.
    pub fn decode(line: &str) -> Result<Self, TransportError> {
        serde_json::from_str(line).map_err(TransportError::Decode)
    }
}

/// Messages the supervisor sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Current wheel speeds [mm/s].
    CurrentSpeed(MotorsSpeed),
}

/// Frame written to the pipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// Reply to a client.
    Data {
        /// Receiver.
        client_id: ClientId,
        /// Sequence number of the query being answered.
        ack_num: SeqNum,
        /// Payload.
        message: ServerMessage,
    },
}

impl OutboundFrame {
    /// Encode as one line without the trailing newline.
    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(TransportError::Encode)
    }
}

/// `ResponseSink` writing one JSON frame per line.
pub struct JsonLineSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineSink<W> {
    /// Sink over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for JsonLineSink<W> {
    fn send_speed(
        &mut self,
        client_id: ClientId,
        ack_num: SeqNum,
        speed: MotorsSpeed,
    ) -> Result<(), TransportError> {
        let frame = OutboundFrame::Data {
            client_id,
            ack_num,
            message: ServerMessage::CurrentSpeed(speed),
        };
        let line = frame.encode()?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Pipe reader feeding a dispatcher.
pub struct PipeTransport<R: BufRead, W: Write> {
    reader: R,
    sink: JsonLineSink<W>,
}

impl<R: BufRead, W: Write> PipeTransport<R, W> {
    /// Transport reading frames from `reader` and replying on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            sink: JsonLineSink::new(writer),
        }
    }

    /// Dispatch frames until the pipe closes.
    ///
    /// Undecodable frames are logged and skipped. On end of input the
    /// motors are stopped and the call returns.
    ///
    /// # Errors
    /// `TransportError::Io` when reading the pipe fails.
    pub fn run(&mut self, dispatcher: &Dispatcher) -> Result<(), TransportError> {
        info!("message pipe open");
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match InboundFrame::decode(text) {
                Ok(InboundFrame::Data {
                    client_id,
                    syn_num,
                    message,
                }) => {
                    debug!(client_id, ?syn_num, ?message, "message received");
                    dispatcher.on_message(client_id, syn_num, message, &mut self.sink);
                }
                Ok(InboundFrame::ClientDied { client_id }) => dispatcher.on_client_died(client_id),
                Err(e) => warn!(error = %e, "dropping frame"),
            }
        }
        dispatcher.on_pipe_closed();
        Ok(())
    }

    /// Recover the writer.
    pub fn into_writer(self) -> W {
        self.sink.into_inner()
    }
}

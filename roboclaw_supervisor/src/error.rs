//! Error types of the supervisor.
//!
//! - `IoError` - A device call refused or failed on the bus
//! - `TransportError` - Message pipe failures
//! - `SupervisorError` - Fatal startup failures

use roboclaw_common::config::ConfigError;
use roboclaw_common::hal::driver::DriverError;
use thiserror::Error;

/// Outcome of a device call made through the bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// A reset is in flight; the call was skipped without touching the device.
    #[error("device disabled during reset")]
    Disabled,

    /// The driver reported a failure.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Message pipe errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading or writing the pipe failed.
    #[error("pipe I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An inbound frame could not be decoded.
    #[error("undecodable frame: {0}")]
    Decode(serde_json::Error),

    /// An outbound frame could not be encoded.
    #[error("unencodable frame: {0}")]
    Encode(serde_json::Error),
}

/// Fatal errors raised while bringing the supervisor up.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Driver lookup or initialization failed.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// A monitor thread could not be spawned.
    #[error("failed to spawn monitor '{name}': {source}")]
    Spawn {
        /// Monitor name.
        name: &'static str,
        /// Underlying OS error.
        source: std::io::Error,
    },
}

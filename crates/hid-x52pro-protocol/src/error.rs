//! Error types for the X52 Pro protocol session.

use crate::types::Command;
use thiserror::Error;

/// Failure reported by a [`ControlTransport`](crate::ControlTransport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("control transfer timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("device disconnected")]
    Disconnected,

    #[error("device accepted {written} of the payload bytes")]
    ShortWrite { written: usize },

    #[error("control transfer failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("no X52 Pro device handle was supplied")]
    MissingDevice,

    #[error("invalid line number: {0} (expected 1-3)")]
    InvalidLineNumber(i32),

    #[error("sending {command} failed: {source}")]
    Transport {
        command: Command,
        #[source]
        source: TransportError,
    },
}

impl ProtocolError {
    /// True for errors caused by the caller rather than the device.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ProtocolError::MissingDevice | ProtocolError::InvalidLineNumber(_)
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ProtocolError::Transport { .. })
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

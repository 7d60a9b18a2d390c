//! Error types for x52ctl

use hid_x52pro_protocol::ProtocolError;
use thiserror::Error;
use x52pro_usb::UsbError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Process exit code for a failed command.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return match cli {
            CliError::DeviceNotFound(_) => 2,
            CliError::ValidationError(_) => 4,
        };
    }
    if let Some(protocol) = error.downcast_ref::<ProtocolError>() {
        return if protocol.is_invalid_argument() { 4 } else { 5 };
    }
    if let Some(usb) = error.downcast_ref::<UsbError>() {
        return if usb.is_permission_denied() { 6 } else { 5 };
    }
    1
}

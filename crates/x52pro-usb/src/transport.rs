//! Blocking libusb control-transfer transport for the X52 Pro.

#![deny(static_mut_refs)]

use hid_x52pro_protocol::{
    CONTROL_PAYLOAD_LEN, Command, ControlTransport, MESSAGE_WAIT_TIMEOUT_MS, TransportError,
    VENDOR_REQUEST,
};
use rusb::{DeviceHandle, Direction, Recipient, RequestType, UsbContext};
use std::time::Duration;
use tracing::trace;

/// Default completion wait for each vendor command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(MESSAGE_WAIT_TIMEOUT_MS);

/// `bmRequestType` for every X52 Pro command: host-to-device, vendor, device recipient.
pub fn vendor_out_request_type() -> u8 {
    rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device)
}

/// Classify a libusb failure for the protocol layer.
pub fn transport_error(error: rusb::Error, timeout: Duration) -> TransportError {
    match error {
        rusb::Error::Timeout => TransportError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        },
        rusb::Error::NoDevice => TransportError::Disconnected,
        other => TransportError::Failed(other.to_string()),
    }
}

/// An opened X52 Pro handle that issues one vendor control transfer at a time.
///
/// `write_control` blocks until the device acknowledges the transfer or the
/// timeout elapses, which gives the ordering the device needs.
pub struct UsbControlTransport<C: UsbContext> {
    handle: DeviceHandle<C>,
    timeout: Duration,
}

impl<C: UsbContext> UsbControlTransport<C> {
    pub fn new(handle: DeviceHandle<C>) -> Self {
        Self::with_timeout(handle, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(handle: DeviceHandle<C>, timeout: Duration) -> Self {
        Self { handle, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn handle(&self) -> &DeviceHandle<C> {
        &self.handle
    }

    pub fn into_inner(self) -> DeviceHandle<C> {
        self.handle
    }
}

impl<C: UsbContext> ControlTransport for UsbControlTransport<C> {
    fn send(&mut self, command: Command) -> Result<(), TransportError> {
        // One-byte data stage; the device ignores its content.
        let payload = [0u8; CONTROL_PAYLOAD_LEN];
        let written = self
            .handle
            .write_control(
                vendor_out_request_type(),
                VENDOR_REQUEST,
                command.value,
                command.index,
                &payload,
                self.timeout,
            )
            .map_err(|e| transport_error(e, self.timeout))?;

        if written < CONTROL_PAYLOAD_LEN {
            return Err(TransportError::ShortWrite { written });
        }
        trace!(index = command.index, value = command.value, "control transfer complete");
        Ok(())
    }
}

//! Error types for USB enumeration and device access.

use crate::discovery::DeviceLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsbError {
    #[error("failed to initialise libusb: {0}")]
    Context(#[source] rusb::Error),

    #[error("USB enumeration failed: {0}")]
    Enumeration(#[source] rusb::Error),

    #[error("permission denied opening device at {location}")]
    PermissionDenied { location: DeviceLocation },

    #[error("failed to open device at {location}: {source}")]
    Open {
        location: DeviceLocation,
        #[source]
        source: rusb::Error,
    },
}

impl UsbError {
    /// True when the device exists but the process may not open it.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, UsbError::PermissionDenied { .. })
    }
}

pub type UsbResult<T> = Result<T, UsbError>;

//! USB plumbing for the Saitek X52 Pro: topology walk, device open, and a
//! blocking control-transfer [`ControlTransport`](hid_x52pro_protocol::ControlTransport)
//! backed by libusb via `rusb`.

#![deny(static_mut_refs)]

pub mod discovery;
pub mod error;
pub mod topology;
pub mod transport;

pub use rusb;

pub use discovery::{DeviceLocation, discover, locate, locate_identity, open_context};
pub use error::{UsbError, UsbResult};
pub use topology::{RusbTopology, USB_CLASS_HUB, UsbTopology, find_device};
pub use transport::{DEFAULT_TIMEOUT, UsbControlTransport, transport_error, vendor_out_request_type};

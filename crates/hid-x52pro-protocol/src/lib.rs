//! Saitek X52 Pro vendor protocol: clock, date and MFD text updates.
//!
//! The X52 Pro exposes its multi-function display and clock through vendor
//! control transfers on the default control pipe. This crate owns the command
//! table, the bit-packing rules and the write-suppression policy. It performs
//! no I/O itself: a [`ControlTransport`] supplied by the caller (see the
//! `x52pro-usb` crate) carries each [`Command`] to the device.
//!
//! ```
//! use hid_x52pro_protocol::mock::RecordingTransport;
//! use hid_x52pro_protocol::{ClockTime, ClockTimeFormat, DisplayLine, X52ProSession};
//!
//! # fn main() -> Result<(), hid_x52pro_protocol::ProtocolError> {
//! let mut transport = RecordingTransport::new();
//! let mut session = X52ProSession::new(&mut transport);
//! session.update_time(ClockTime::new(13, 45), ClockTimeFormat::Clock24Hour, false)?;
//! session.write_line(DisplayLine::One, b"READY")?;
//! assert_eq!(transport.sent().len(), 5);
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]

pub mod encode;
pub mod error;
pub mod ids;
pub mod session;
pub mod transport;
pub mod types;

pub use encode::{
    MAX_APPEND_COMMANDS, MAX_CHARACTERS_PER_LINE, PackedDate, append_index_for_line,
    delete_index_for_line, encode_line, order_date_components, pack_date, pack_line_text,
    pack_time,
};
pub use error::{ProtocolError, ProtocolResult, TransportError};
pub use ids::{
    CONTROL_PAYLOAD_LEN, CommandTable, DeviceIdentity, MESSAGE_WAIT_TIMEOUT_MS, VENDOR_REQUEST,
    X52_PRO, X52_PRO_PRODUCT_ID, X52_VENDOR_ID, commands,
};
pub use session::{LastWritten, X52ProSession};
pub use transport::{ControlTransport, mock};
pub use types::{
    ClockDate, ClockDateFormat, ClockTime, ClockTimeFormat, Command, DisplayLine, WriteOutcome,
};

//! X52 Pro USB identity and vendor command constants.
//!
//! # Sources
//!
//! - **USB ID database**: VID `0x06A3` is "Saitek PLC"; PID `0x0762` is the
//!   "Saitek X52 Pro Flight Control System".
//! - **nirenjan/x52-mac `vendor_api.md`**: reverse-engineered vendor request
//!   `0x91` and the wIndex command table below.
//!
//! Every command is a host-to-device vendor control transfer:
//!
//! ```text
//! bmRequestType = 0x40 (OUT | VENDOR | DEVICE)
//! bRequest      = 0x91
//! wValue        = 16-bit packed payload
//! wIndex        = command index (table below)
//! wLength       = 1 (payload content is ignored by the device)
//! ```

#![deny(static_mut_refs)]

use crate::types::DisplayLine;

/// Saitek USB Vendor ID.
pub const X52_VENDOR_ID: u16 = 0x06A3;

/// X52 Pro USB Product ID.
pub const X52_PRO_PRODUCT_ID: u16 = 0x0762;

/// Vendor-specific `bRequest` shared by every MFD/clock command.
pub const VENDOR_REQUEST: u8 = 0x91;

/// Upper bound, in milliseconds, to wait for a control transfer to complete.
///
/// The device silently ignores a request that arrives while the previous one
/// is still being processed, so every transfer must be awaited.
pub const MESSAGE_WAIT_TIMEOUT_MS: u64 = 100;

/// Length of the data stage attached to every command.
pub const CONTROL_PAYLOAD_LEN: usize = 1;

/// A USB (vendor, product) identifier pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceIdentity {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// The only device this protocol targets.
pub const X52_PRO: DeviceIdentity = DeviceIdentity::new(X52_VENDOR_ID, X52_PRO_PRODUCT_ID);

/// Command indices carried in `wIndex`.
pub mod commands {
    pub const UPDATE_PRIMARY_CLOCK: u16 = 0xC0;
    pub const UPDATE_DATE_DAY_MONTH: u16 = 0xC4;
    pub const UPDATE_DATE_YEAR: u16 = 0xC8;

    // Line indices are bit flags on the low nibble: 1, 2 and 4.
    pub const APPEND_LINE1: u16 = 0xD1;
    pub const APPEND_LINE2: u16 = 0xD2;
    pub const APPEND_LINE3: u16 = 0xD4;
    pub const DELETE_LINE1: u16 = 0xD9;
    pub const DELETE_LINE2: u16 = 0xDA;
    pub const DELETE_LINE3: u16 = 0xDC;
}

/// Read-only command index table bound to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable {
    pub update_primary_clock: u16,
    pub update_date_day_month: u16,
    pub update_date_year: u16,
    pub delete_line: [u16; 3],
    pub append_line: [u16; 3],
}

impl CommandTable {
    /// Command table of the X52 Pro MFD.
    pub const X52_PRO: CommandTable = CommandTable {
        update_primary_clock: commands::UPDATE_PRIMARY_CLOCK,
        update_date_day_month: commands::UPDATE_DATE_DAY_MONTH,
        update_date_year: commands::UPDATE_DATE_YEAR,
        delete_line: [
            commands::DELETE_LINE1,
            commands::DELETE_LINE2,
            commands::DELETE_LINE3,
        ],
        append_line: [
            commands::APPEND_LINE1,
            commands::APPEND_LINE2,
            commands::APPEND_LINE3,
        ],
    };

    pub fn delete_index(&self, line: DisplayLine) -> u16 {
        match line {
            DisplayLine::One => self.delete_line[0],
            DisplayLine::Two => self.delete_line[1],
            DisplayLine::Three => self.delete_line[2],
        }
    }

    pub fn append_index(&self, line: DisplayLine) -> u16 {
        match line {
            DisplayLine::One => self.append_line[0],
            DisplayLine::Two => self.append_line[1],
            DisplayLine::Three => self.append_line[2],
        }
    }

    /// All nine indices in table order.
    pub fn all(&self) -> [u16; 9] {
        let [d1, d2, d3] = self.delete_line;
        let [a1, a2, a3] = self.append_line;
        [
            self.update_primary_clock,
            self.update_date_day_month,
            self.update_date_year,
            d1,
            d2,
            d3,
            a1,
            a2,
            a3,
        ]
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::X52_PRO
    }
}

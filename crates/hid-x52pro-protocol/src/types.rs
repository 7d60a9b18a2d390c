//! Value types for the X52 Pro clock and MFD protocol.

#![deny(static_mut_refs)]

use crate::error::ProtocolError;

/// Clock display convention.
///
/// Only toggles bit 15 of the packed time value. The hour itself is always
/// sent as the 24-hour numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockTimeFormat {
    Clock12Hour,
    #[default]
    Clock24Hour,
}

/// Ordering of the date components on the clock display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockDateFormat {
    #[default]
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

/// One of the three MFD text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayLine {
    One,
    Two,
    Three,
}

impl DisplayLine {
    pub const ALL: [DisplayLine; 3] = [DisplayLine::One, DisplayLine::Two, DisplayLine::Three];

    /// Validate a 1-based line number.
    pub fn from_number(line: i32) -> Result<Self, ProtocolError> {
        match line {
            1 => Ok(DisplayLine::One),
            2 => Ok(DisplayLine::Two),
            3 => Ok(DisplayLine::Three),
            other => Err(ProtocolError::InvalidLineNumber(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            DisplayLine::One => 1,
            DisplayLine::Two => 2,
            DisplayLine::Three => 3,
        }
    }
}

impl TryFrom<i32> for DisplayLine {
    type Error = ProtocolError;

    fn try_from(line: i32) -> Result<Self, Self::Error> {
        Self::from_number(line)
    }
}

impl TryFrom<u8> for DisplayLine {
    type Error = ProtocolError;

    fn try_from(line: u8) -> Result<Self, Self::Error> {
        Self::from_number(i32::from(line))
    }
}

impl std::fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.number())
    }
}

/// A single vendor command: `wIndex` selects the register, `wValue` carries the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub index: u16,
    pub value: u16,
}

impl Command {
    pub const fn new(index: u16, value: u16) -> Self {
        Self { index, value }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "index=0x{:02X} value=0x{:04X}", self.index, self.value)
    }
}

/// Wall-clock time as shown on the primary clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClockTime {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Take hour and minute from any chrono time-like value.
    pub fn from_timelike<T: chrono::Timelike>(time: &T) -> Self {
        Self {
            hour: u8::try_from(time.hour()).unwrap_or(u8::MAX),
            minute: u8::try_from(time.minute()).unwrap_or(u8::MAX),
        }
    }
}

/// Calendar date as shown on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockDate {
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
    /// Full year, e.g. 2026.
    pub year: u16,
}

impl ClockDate {
    pub const fn new(day: u8, month: u8, year: u16) -> Self {
        Self { day, month, year }
    }

    /// Take day, month and year from any chrono date-like value.
    ///
    /// Years outside `0..=65535` saturate.
    pub fn from_datelike<D: chrono::Datelike>(date: &D) -> Self {
        let year = date.year().clamp(0, i32::from(u16::MAX));
        Self {
            day: u8::try_from(date.day()).unwrap_or(u8::MAX),
            month: u8::try_from(date.month()).unwrap_or(u8::MAX),
            year: u16::try_from(year).unwrap_or(u16::MAX),
        }
    }
}

/// Whether an update call put anything on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
    /// Number of control transfers issued.
    pub transfers: usize,
}

impl WriteOutcome {
    pub fn was_sent(&self) -> bool {
        self.transfers > 0
    }
}

//! Pure packing rules for clock, date and MFD text values.
//!
//! All functions are allocation-free except [`encode_line`], which builds the
//! full command sequence for one line write.
//!
//! # Wire layout
//!
//! ```text
//! time       : [15] 24h flag | [14:8] hour | [7:0] minute
//! day/month  : [15:8] second component | [7:0] first component
//! year       : third component, verbatim
//! line text  : [15:8] second character | [7:0] first character
//! ```
//!
//! No range validation is performed: sub-fields are bit-packed as given and
//! byte fields keep the low byte of their component.

#![deny(static_mut_refs)]

use crate::error::ProtocolResult;
use crate::ids::CommandTable;
use crate::types::{ClockDate, ClockDateFormat, ClockTime, ClockTimeFormat, Command, DisplayLine};

/// Characters beyond this count are dropped from a line write.
pub const MAX_CHARACTERS_PER_LINE: usize = 16;

/// Characters carried by one append command.
pub const CHARACTERS_PER_COMMAND: usize = 2;

/// Maximum append commands issued for one line write.
pub const MAX_APPEND_COMMANDS: usize = MAX_CHARACTERS_PER_LINE / CHARACTERS_PER_COMMAND;

/// Bit 15 of the time value selects the 24-hour display convention.
pub const TIME_FORMAT_24H_BIT: u16 = 0x8000;

/// Pack hour and minute into the primary clock value.
pub fn pack_time(time: ClockTime, format: ClockTimeFormat) -> u16 {
    let value = u16::from_le_bytes([time.minute, time.hour]);
    match format {
        ClockTimeFormat::Clock24Hour => value | TIME_FORMAT_24H_BIT,
        ClockTimeFormat::Clock12Hour => value & !TIME_FORMAT_24H_BIT,
    }
}

/// Reorder `(day, month, year)` into the triple packed for `format`.
pub fn order_date_components(date: ClockDate, format: ClockDateFormat) -> [u16; 3] {
    let day = u16::from(date.day);
    let month = u16::from(date.month);
    match format {
        ClockDateFormat::DayMonthYear => [day, month, date.year],
        ClockDateFormat::MonthDayYear => [month, day, date.year],
        ClockDateFormat::YearMonthDay => [date.year, month, day],
    }
}

/// The two date register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedDate {
    /// First component in the low byte, second in the high byte.
    pub day_month: u16,
    /// Third component, unpacked.
    pub year: u16,
}

pub fn pack_date(date: ClockDate, format: ClockDateFormat) -> PackedDate {
    let [first, second, third] = order_date_components(date, format);
    let [low, _] = first.to_le_bytes();
    let [high, _] = second.to_le_bytes();
    PackedDate {
        day_month: u16::from_le_bytes([low, high]),
        year: third,
    }
}

/// Pack up to [`MAX_CHARACTERS_PER_LINE`] character codes into append values.
///
/// Each value holds a pair of codes; an odd trailing code leaves the high
/// byte zero.
pub fn pack_line_text(text: &[u8]) -> impl Iterator<Item = u16> + '_ {
    let bounded = text.get(..MAX_CHARACTERS_PER_LINE).unwrap_or(text);
    bounded.chunks(CHARACTERS_PER_COMMAND).map(|pair| {
        let first = pair.first().copied().unwrap_or(0);
        let second = pair.get(1).copied().unwrap_or(0);
        u16::from_le_bytes([first, second])
    })
}

/// Full command sequence for one line write: delete, then appends.
pub fn encode_line(table: &CommandTable, line: DisplayLine, text: &[u8]) -> Vec<Command> {
    let append = table.append_index(line);
    let mut commands = Vec::with_capacity(1 + MAX_APPEND_COMMANDS);
    commands.push(Command::new(table.delete_index(line), 0));
    commands.extend(pack_line_text(text).map(|value| Command::new(append, value)));
    commands
}

/// Delete-line command index for a raw 1-based line number.
pub fn delete_index_for_line(line: i32) -> ProtocolResult<u16> {
    let line = DisplayLine::from_number(line)?;
    Ok(CommandTable::X52_PRO.delete_index(line))
}

/// Append-line command index for a raw 1-based line number.
pub fn append_index_for_line(line: i32) -> ProtocolResult<u16> {
    let line = DisplayLine::from_number(line)?;
    Ok(CommandTable::X52_PRO.append_index(line))
}

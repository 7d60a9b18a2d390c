//! X52 Pro protocol session: clock, date and MFD line updates.
//!
//! A session borrows one open device transport for the duration of a control
//! run. It remembers the last clock and date values it computed so repeated
//! updates with unchanged values do not touch the bus.
//!
//! # Concurrency
//!
//! Every operation takes `&mut self` and issues its transfers strictly one at
//! a time. The last-written caches carry no lock; sharing a session across
//! threads requires external serialisation.
//!
//! # Cache semantics
//!
//! The caches start at zero, which is also a valid packed value: a first
//! update whose packed value is exactly zero is suppressed unless forced.
//! Caches are refreshed before the transfer is attempted, so after a
//! transport failure they may be ahead of the device. Pass
//! `force_update = true` on the next call to resynchronise.

#![deny(static_mut_refs)]

use crate::encode::{encode_line, pack_date, pack_time};
use crate::error::{ProtocolError, ProtocolResult};
use crate::ids::CommandTable;
use crate::transport::ControlTransport;
use crate::types::{
    ClockDate, ClockDateFormat, ClockTime, ClockTimeFormat, Command, DisplayLine, WriteOutcome,
};
use tracing::{debug, trace};

/// Snapshot of the session's last-written register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastWritten {
    pub time: u16,
    pub day_month: u16,
    pub year: u16,
}

/// Protocol session bound to one X52 Pro transport.
pub struct X52ProSession<'a, T: ControlTransport + ?Sized> {
    transport: &'a mut T,
    table: CommandTable,
    last_time_written: u16,
    last_day_month_written: u16,
    last_year_written: u16,
}

impl<'a, T: ControlTransport + ?Sized> X52ProSession<'a, T> {
    /// Bind a session to an open transport using the X52 Pro command table.
    pub fn new(transport: &'a mut T) -> Self {
        Self::with_command_table(transport, CommandTable::X52_PRO)
    }

    pub fn with_command_table(transport: &'a mut T, table: CommandTable) -> Self {
        Self {
            transport,
            table,
            last_time_written: 0,
            last_day_month_written: 0,
            last_year_written: 0,
        }
    }

    /// Bind a session to the result of device discovery.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingDevice`] when no transport was found.
    pub fn from_discovered(transport: Option<&'a mut T>) -> ProtocolResult<Self> {
        transport.map(Self::new).ok_or(ProtocolError::MissingDevice)
    }

    pub fn command_table(&self) -> &CommandTable {
        &self.table
    }

    pub fn last_written(&self) -> LastWritten {
        LastWritten {
            time: self.last_time_written,
            day_month: self.last_day_month_written,
            year: self.last_year_written,
        }
    }

    /// Update the primary clock.
    ///
    /// Issues at most one transfer; none when the packed value matches the
    /// last one written and `force_update` is false.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Transport`] if the transfer fails.
    pub fn update_time(
        &mut self,
        time: ClockTime,
        format: ClockTimeFormat,
        force_update: bool,
    ) -> ProtocolResult<WriteOutcome> {
        let value = pack_time(time, format);
        let changed = value != self.last_time_written;
        self.last_time_written = value;

        if !force_update && !changed {
            trace!(value, "primary clock unchanged; skipping transfer");
            return Ok(WriteOutcome::default());
        }

        self.send(Command::new(self.table.update_primary_clock, value))?;
        debug!(
            hour = time.hour,
            minute = time.minute,
            ?format,
            "updated X52 Pro primary clock"
        );
        Ok(WriteOutcome { transfers: 1 })
    }

    /// Update the clock date.
    ///
    /// The day/month register and the year register are compared and sent
    /// independently, so zero, one or two transfers are issued.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Transport`] on the first failing transfer; the
    /// year transfer is not attempted after a day/month failure.
    pub fn update_date(
        &mut self,
        date: ClockDate,
        format: ClockDateFormat,
        force_update: bool,
    ) -> ProtocolResult<WriteOutcome> {
        let packed = pack_date(date, format);
        let send_day_month = force_update || packed.day_month != self.last_day_month_written;
        let send_year = force_update || packed.year != self.last_year_written;
        self.last_day_month_written = packed.day_month;
        self.last_year_written = packed.year;

        let mut outcome = WriteOutcome::default();
        if send_day_month {
            self.send(Command::new(
                self.table.update_date_day_month,
                packed.day_month,
            ))?;
            outcome.transfers = outcome.transfers.saturating_add(1);
        } else {
            trace!(value = packed.day_month, "date day/month unchanged; skipping transfer");
        }

        if send_year {
            self.send(Command::new(self.table.update_date_year, packed.year))?;
            outcome.transfers = outcome.transfers.saturating_add(1);
        } else {
            trace!(value = packed.year, "date year unchanged; skipping transfer");
        }

        if outcome.was_sent() {
            debug!(
                day = date.day,
                month = date.month,
                year = date.year,
                ?format,
                transfers = outcome.transfers,
                "updated X52 Pro date"
            );
        }
        Ok(outcome)
    }

    /// Replace the content of one MFD line.
    ///
    /// Always clears the line first, then appends the text two character codes
    /// per transfer. Codes must already be in the device character map; codes
    /// past the sixteenth are ignored. An empty slice leaves the line blank.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Transport`] on the first failing transfer;
    /// remaining appends are not attempted.
    pub fn write_line(&mut self, line: DisplayLine, text: &[u8]) -> ProtocolResult<WriteOutcome> {
        let commands = encode_line(&self.table, line, text);
        let mut outcome = WriteOutcome::default();
        for command in commands {
            self.send(command)?;
            outcome.transfers = outcome.transfers.saturating_add(1);
        }
        debug!(
            line = line.number(),
            chars = text.len(),
            transfers = outcome.transfers,
            "wrote X52 Pro MFD line"
        );
        Ok(outcome)
    }

    /// [`write_line`](Self::write_line) for a raw 1-based line number.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidLineNumber`] before any transfer when
    /// `line` is not 1, 2 or 3.
    pub fn write_line_number(&mut self, line: i32, text: &[u8]) -> ProtocolResult<WriteOutcome> {
        let line = DisplayLine::from_number(line)?;
        self.write_line(line, text)
    }

    /// Blank one MFD line.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Transport`] if the delete transfer fails.
    pub fn clear_line(&mut self, line: DisplayLine) -> ProtocolResult<WriteOutcome> {
        self.write_line(line, &[])
    }

    fn send(&mut self, command: Command) -> ProtocolResult<()> {
        trace!(index = command.index, value = command.value, "sending vendor command");
        self.transport
            .send(command)
            .map_err(|source| ProtocolError::Transport { command, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::ids::commands;
    use crate::transport::mock::RecordingTransport;

    #[test]
    fn new_session_starts_with_zero_caches() {
        let mut transport = RecordingTransport::new();
        let session = X52ProSession::new(&mut transport);
        assert_eq!(session.last_written(), LastWritten::default());
        assert_eq!(session.command_table(), &CommandTable::X52_PRO);
    }

    #[test]
    fn from_discovered_rejects_missing_device() {
        let result = X52ProSession::<RecordingTransport>::from_discovered(None);
        assert!(matches!(result, Err(ProtocolError::MissingDevice)));
    }

    #[test]
    fn from_discovered_binds_present_device() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::from_discovered(Some(&mut transport))?;
        session.update_time(ClockTime::new(8, 30), ClockTimeFormat::Clock24Hour, false)?;
        assert_eq!(transport.sent().len(), 1);
        Ok(())
    }

    #[test]
    fn update_time_sends_packed_value() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let outcome =
            session.update_time(ClockTime::new(13, 45), ClockTimeFormat::Clock24Hour, false)?;
        assert!(outcome.was_sent());
        assert_eq!(session.last_written().time, 0x8D2D);
        assert_eq!(
            transport.sent(),
            &[Command::new(commands::UPDATE_PRIMARY_CLOCK, 0x8D2D)]
        );
        Ok(())
    }

    #[test]
    fn update_time_suppresses_repeat_unless_forced() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let time = ClockTime::new(7, 5);
        session.update_time(time, ClockTimeFormat::Clock24Hour, false)?;
        let repeat = session.update_time(time, ClockTimeFormat::Clock24Hour, false)?;
        assert!(!repeat.was_sent());
        let forced = session.update_time(time, ClockTimeFormat::Clock24Hour, true)?;
        assert_eq!(forced.transfers, 1);
        assert_eq!(transport.sent().len(), 2);
        Ok(())
    }

    #[test]
    fn first_zero_time_is_suppressed() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let outcome =
            session.update_time(ClockTime::new(0, 0), ClockTimeFormat::Clock12Hour, false)?;
        assert!(!outcome.was_sent());
        assert!(transport.sent().is_empty());
        Ok(())
    }

    #[test]
    fn update_date_sends_both_registers_first_time() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let outcome = session.update_date(
            ClockDate::new(19, 10, 2026),
            ClockDateFormat::DayMonthYear,
            false,
        )?;
        assert_eq!(outcome.transfers, 2);
        assert_eq!(
            transport.sent(),
            &[
                Command::new(commands::UPDATE_DATE_DAY_MONTH, 0x0A13),
                Command::new(commands::UPDATE_DATE_YEAR, 2026),
            ]
        );
        Ok(())
    }

    #[test]
    fn update_date_day_month_change_sends_one_transfer() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let format = ClockDateFormat::DayMonthYear;
        session.update_date(ClockDate::new(19, 10, 2026), format, false)?;
        let outcome = session.update_date(ClockDate::new(20, 10, 2026), format, false)?;
        assert_eq!(outcome.transfers, 1);
        assert_eq!(
            transport.sent().last(),
            Some(&Command::new(commands::UPDATE_DATE_DAY_MONTH, 0x0A14))
        );
        Ok(())
    }

    #[test]
    fn update_time_failure_still_refreshes_cache() {
        let mut transport =
            RecordingTransport::failing_on(0, TransportError::Timeout { timeout_ms: 100 });
        let mut session = X52ProSession::new(&mut transport);
        let result = session.update_time(ClockTime::new(9, 15), ClockTimeFormat::Clock24Hour, false);
        assert!(matches!(
            result,
            Err(ProtocolError::Transport {
                source: TransportError::Timeout { timeout_ms: 100 },
                ..
            })
        ));
        assert_eq!(session.last_written().time, 0x890F);
    }

    #[test]
    fn update_date_failure_skips_year_transfer() {
        let mut transport = RecordingTransport::failing_on(0, TransportError::Disconnected);
        let mut session = X52ProSession::new(&mut transport);
        let result = session.update_date(
            ClockDate::new(1, 1, 2027),
            ClockDateFormat::DayMonthYear,
            false,
        );
        assert!(matches!(result, Err(ProtocolError::Transport { .. })));
        assert_eq!(session.last_written().year, 2027);
        assert_eq!(transport.attempts(), 1);
    }

    #[test]
    fn failed_date_update_does_not_block_line_write() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::failing_on(0, TransportError::Disconnected);
        let mut session = X52ProSession::new(&mut transport);
        let failed = session.update_date(
            ClockDate::new(1, 1, 2027),
            ClockDateFormat::DayMonthYear,
            false,
        );
        assert!(matches!(failed, Err(ProtocolError::Transport { .. })));
        let outcome = session.write_line(DisplayLine::One, b"OK")?;
        assert_eq!(outcome.transfers, 2);
        Ok(())
    }

    #[test]
    fn write_line_number_validates_before_sending() {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        for bad in [0, 4, -1] {
            assert_eq!(
                session.write_line_number(bad, b"text"),
                Err(ProtocolError::InvalidLineNumber(bad))
            );
        }
        assert_eq!(transport.attempts(), 0);
    }

    #[test]
    fn clear_line_sends_only_delete() -> ProtocolResult<()> {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        session.clear_line(DisplayLine::Two)?;
        assert_eq!(transport.sent(), &[Command::new(commands::DELETE_LINE2, 0)]);
        Ok(())
    }
}

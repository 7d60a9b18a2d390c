//! Property-based tests for session write suppression and line sequencing.

use hid_x52pro_protocol::mock::RecordingTransport;
use hid_x52pro_protocol::{
    ClockDate, ClockDateFormat, ClockTime, ClockTimeFormat, DisplayLine, MAX_APPEND_COMMANDS,
    ProtocolError, TransportError, X52ProSession, commands,
};
use proptest::prelude::*;

fn time_format() -> impl Strategy<Value = ClockTimeFormat> {
    prop_oneof![
        Just(ClockTimeFormat::Clock12Hour),
        Just(ClockTimeFormat::Clock24Hour),
    ]
}

fn date_format() -> impl Strategy<Value = ClockDateFormat> {
    prop_oneof![
        Just(ClockDateFormat::DayMonthYear),
        Just(ClockDateFormat::MonthDayYear),
        Just(ClockDateFormat::YearMonthDay),
    ]
}

fn display_line() -> impl Strategy<Value = DisplayLine> {
    prop_oneof![
        Just(DisplayLine::One),
        Just(DisplayLine::Two),
        Just(DisplayLine::Three),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The same time twice in a row is written once; any change writes exactly once more.
    #[test]
    fn prop_time_suppression(
        hour in 0u8..=23,
        minute in 0u8..=59,
        format in time_format(),
        next_hour in 0u8..=23,
        next_minute in 0u8..=59,
        next_format in time_format(),
    ) {
        // Start from a forced write so the zero-initialised cache plays no part.
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let first = ClockTime::new(hour, minute);
        session.update_time(first, format, true).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let repeat = session.update_time(first, format, false).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(repeat.transfers, 0);

        let next = ClockTime::new(next_hour, next_minute);
        let changed = next != first || next_format != format;
        let outcome = session.update_time(next, next_format, false).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(outcome.transfers, usize::from(changed));
        prop_assert_eq!(transport.sent().len(), 1 + usize::from(changed));
    }

    /// Day/month and year registers are compared independently.
    #[test]
    fn prop_date_registers_independent(
        day in 1u8..=28,
        month in 1u8..=12,
        year in 2000u16..=2099,
        next_year in 2000u16..=2099,
        format in date_format(),
    ) {
        prop_assume!(format != ClockDateFormat::YearMonthDay);
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        session.update_date(ClockDate::new(day, month, year), format, true)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let outcome = session.update_date(ClockDate::new(day, month, next_year), format, false)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected = usize::from(next_year != year);
        prop_assert_eq!(outcome.transfers, expected);
        if expected == 1 {
            let last = transport.sent().last().copied();
            prop_assert_eq!(last.map(|c| c.index), Some(commands::UPDATE_DATE_YEAR));
            prop_assert_eq!(last.map(|c| c.value), Some(next_year));
        }
    }

    /// A line write is one delete followed by at most eight appends, all on that line.
    #[test]
    fn prop_line_write_shape(
        line in display_line(),
        text in proptest::collection::vec(any::<u8>(), 0..40),
    ) {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        session.write_line(line, &text).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let sent = transport.sent();
        let (delete, appends) = sent.split_first().ok_or_else(|| TestCaseError::fail("nothing sent"))?;
        prop_assert_eq!(delete.value, 0);
        prop_assert_eq!(delete.index & 0xF8, 0xD8);
        prop_assert!(appends.len() <= MAX_APPEND_COMMANDS);
        prop_assert_eq!(appends.len(), text.len().min(16).div_ceil(2));
        for append in appends {
            prop_assert_eq!(append.index & 0xF8, 0xD0);
            prop_assert_eq!(append.index & 0x07, delete.index & 0x07);
        }
    }

    /// A failing append stops the write: nothing after the failure is attempted.
    #[test]
    fn prop_append_failure_aborts(
        text in proptest::collection::vec(any::<u8>(), 3..32),
        fail_at in 1usize..3,
    ) {
        let mut transport = RecordingTransport::failing_on(fail_at, TransportError::Disconnected);
        let mut session = X52ProSession::new(&mut transport);
        let result = session.write_line(DisplayLine::Two, &text);
        let is_transport_error = matches!(result, Err(ProtocolError::Transport { .. }));
        prop_assert!(is_transport_error);
        prop_assert_eq!(transport.attempts(), fail_at + 1);
        prop_assert_eq!(transport.sent().len(), fail_at);
    }
}

#[test]
fn empty_line_write_issues_only_delete() -> Result<(), ProtocolError> {
    for line in DisplayLine::ALL {
        let mut transport = RecordingTransport::new();
        let mut session = X52ProSession::new(&mut transport);
        let outcome = session.write_line(line, &[])?;
        assert_eq!(outcome.transfers, 1);
        assert_eq!(transport.sent().len(), 1);
    }
    Ok(())
}

#[test]
fn twenty_character_line_is_capped_at_eight_appends() -> Result<(), ProtocolError> {
    let mut transport = RecordingTransport::new();
    let mut session = X52ProSession::new(&mut transport);
    session.write_line_number(1, b"ABCDEFGHIJKLMNOPQRST")?;
    assert_eq!(transport.sent().len(), 1 + 8);
    Ok(())
}

#[test]
fn year_only_change_sends_year_command() -> Result<(), ProtocolError> {
    let mut transport = RecordingTransport::new();
    let mut session = X52ProSession::new(&mut transport);
    let format = ClockDateFormat::DayMonthYear;
    session.update_date(ClockDate::new(31, 12, 2026), format, false)?;
    let outcome = session.update_date(ClockDate::new(31, 12, 2027), format, false)?;
    assert_eq!(outcome.transfers, 1);
    assert_eq!(transport.sent().len(), 3);
    Ok(())
}

//! Command handlers. Each run opens one protocol session against the device.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use hid_x52pro_protocol::{
    ClockDate, ClockDateFormat, ClockTime, ClockTimeFormat, DisplayLine, ProtocolError, X52_PRO,
    X52ProSession,
};
use tracing::info;
use x52pro_usb::rusb::Context;
use x52pro_usb::{UsbControlTransport, discover, locate, open_context};

use crate::error::CliError;
use crate::output;
use crate::text::encode_display_text;
use crate::{ClockArgs, Commands, DateFormatArg, TimeFormatArg};

type Session<'a> = X52ProSession<'a, UsbControlTransport<Context>>;

impl From<DateFormatArg> for ClockDateFormat {
    fn from(arg: DateFormatArg) -> Self {
        match arg {
            DateFormatArg::Dmy => ClockDateFormat::DayMonthYear,
            DateFormatArg::Mdy => ClockDateFormat::MonthDayYear,
            DateFormatArg::Ymd => ClockDateFormat::YearMonthDay,
        }
    }
}

impl From<TimeFormatArg> for ClockTimeFormat {
    fn from(arg: TimeFormatArg) -> Self {
        match arg {
            TimeFormatArg::H12 => ClockTimeFormat::Clock12Hour,
            TimeFormatArg::H24 => ClockTimeFormat::Clock24Hour,
        }
    }
}

pub fn execute(command: &Commands, json: bool) -> Result<()> {
    match command {
        Commands::Find => find(json),
        Commands::Clock(args) => {
            let now = Local::now();
            with_session(|session| apply_clock(session, args, &now))?;
            output::print_done(&format!("Clock set to {}", now.format("%Y-%m-%d %H:%M")), json);
            Ok(())
        }
        Commands::Line { line, text } => {
            let line = DisplayLine::try_from(*line)?;
            let codes = encode_display_text(text.as_deref().unwrap_or_default())?;
            with_session(|session| session.write_line(line, &codes).map(drop))?;
            let verb = if codes.is_empty() { "Cleared" } else { "Wrote" };
            output::print_done(&format!("{verb} MFD {line}"), json);
            Ok(())
        }
        Commands::Sync {
            clock,
            line1,
            line2,
            line3,
        } => {
            let lines = collect_lines([line1, line2, line3])?;
            let now = Local::now();
            with_session(|session| {
                apply_clock(session, clock, &now)?;
                for (line, codes) in &lines {
                    session.write_line(*line, codes)?;
                }
                Ok(())
            })?;
            output::print_done(
                &format!("Synced clock and {} MFD line(s)", lines.len()),
                json,
            );
            Ok(())
        }
    }
}

fn find(json: bool) -> Result<()> {
    let context = open_context()?;
    match locate(&context)? {
        Some(location) => {
            output::print_location(&location, json);
            Ok(())
        }
        None => Err(CliError::DeviceNotFound(X52_PRO.to_string()).into()),
    }
}

/// Validate and encode every provided line before touching the device.
fn collect_lines(texts: [&Option<String>; 3]) -> Result<Vec<(DisplayLine, Vec<u8>)>> {
    DisplayLine::ALL
        .into_iter()
        .zip(texts)
        .filter_map(|(line, text)| text.as_deref().map(|text| (line, text)))
        .map(|(line, text)| {
            let codes = encode_display_text(text).with_context(|| format!("MFD {line}"))?;
            Ok((line, codes))
        })
        .collect()
}

/// Date registers first, then the primary clock.
fn apply_clock(
    session: &mut Session<'_>,
    args: &ClockArgs,
    now: &DateTime<Local>,
) -> Result<(), ProtocolError> {
    let date = session.update_date(
        ClockDate::from_datelike(now),
        args.date_format.into(),
        args.force,
    )?;
    let time = session.update_time(
        ClockTime::from_timelike(now),
        args.time_format.into(),
        args.force,
    )?;
    info!(
        "Clock update issued {} date and {} time transfer(s)",
        date.transfers, time.transfers
    );
    Ok(())
}

fn with_session<F>(operation: F) -> Result<()>
where
    F: FnOnce(&mut Session<'_>) -> Result<(), ProtocolError>,
{
    let context = open_context()?;
    let mut transport =
        discover(&context)?.ok_or_else(|| CliError::DeviceNotFound(X52_PRO.to_string()))?;
    let mut session = X52ProSession::new(&mut transport);
    operation(&mut session)?;
    Ok(())
}

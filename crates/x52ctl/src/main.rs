//! x52ctl - Saitek X52 Pro clock and MFD control
//!
//! Sets the joystick's primary clock and date from the host clock and writes
//! text to the three lines of the multi-function display.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod text;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "x52ctl")]
#[command(about = "Saitek X52 Pro control - set the clock and MFD text")]
#[command(version)]
#[command(long_about = "
x52ctl talks to a Saitek X52 Pro over USB vendor control transfers.
It sets the primary clock and date from the local time and writes up to
16 characters to each of the three MFD lines.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the X52 Pro on the USB bus
    Find,

    /// Set the primary clock and date from the local time
    Clock(ClockArgs),

    /// Replace one MFD line; omit TEXT to clear it
    Line {
        /// MFD line number
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        line: u8,

        /// Printable ASCII text, at most 16 characters are shown
        text: Option<String>,
    },

    /// Set the clock and any given MFD lines in one session
    Sync {
        #[command(flatten)]
        clock: ClockArgs,

        #[arg(long)]
        line1: Option<String>,

        #[arg(long)]
        line2: Option<String>,

        #[arg(long)]
        line3: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct ClockArgs {
    /// Order of the date components on the display
    #[arg(long, value_enum, env = "X52CTL_DATE_FORMAT", default_value = "dmy")]
    date_format: DateFormatArg,

    /// 12 or 24 hour clock display
    #[arg(long, value_enum, env = "X52CTL_TIME_FORMAT", default_value = "24")]
    time_format: TimeFormatArg,

    /// Send every register even if it matches the last value written
    #[arg(long)]
    force: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DateFormatArg {
    Dmy,
    Mdy,
    Ymd,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum TimeFormatArg {
    #[value(name = "12")]
    H12,
    #[value(name = "24")]
    H24,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("x52ctl={log_level},hid_x52pro_protocol={log_level},x52pro_usb={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match commands::execute(&cli.command, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

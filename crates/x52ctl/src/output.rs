//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use serde_json::json;
use x52pro_usb::DeviceLocation;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

pub fn print_location(location: &DeviceLocation, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "device": location,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format device as JSON: {e}"),
        }
    } else {
        println!("{} X52 Pro at {}", "●".green(), location);
    }
}

pub fn print_done(message: &str, json: bool) {
    if json {
        println!("{}", json!({ "success": true, "message": message }));
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

//! Conversion of user text into MFD character codes.
//!
//! Printable ASCII maps to itself in the MFD character ROM. Anything else is
//! rejected rather than guessed at.

use crate::error::CliError;
use hid_x52pro_protocol::MAX_CHARACTERS_PER_LINE;
use tracing::warn;

pub fn encode_display_text(text: &str) -> Result<Vec<u8>, CliError> {
    let codes = text
        .chars()
        .map(|c| {
            u8::try_from(c)
                .ok()
                .filter(|code| code.is_ascii() && !code.is_ascii_control())
                .ok_or_else(|| {
                    CliError::ValidationError(format!(
                        "character {c:?} is not printable ASCII and cannot be shown on the MFD"
                    ))
                })
        })
        .collect::<Result<Vec<u8>, CliError>>()?;

    if codes.len() > MAX_CHARACTERS_PER_LINE {
        warn!(
            "Text is {} characters; the MFD shows the first {}",
            codes.len(),
            MAX_CHARACTERS_PER_LINE
        );
    }
    Ok(codes)
}

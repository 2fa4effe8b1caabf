//! Text preparation for the builtin PDF fonts.
//!
//! The report uses the standard Helvetica faces, which only cover the
//! WinAnsi (Windows-1252) character set. Every string is checked before it
//! is laid out.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ExportError;

/// Drawn in place of characters the report font cannot show.
pub const REPLACEMENT_CHAR: char = '?';

/// What to do with characters outside the font's character set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingPolicy {
    /// Substitute [`REPLACEMENT_CHAR`] and log a warning.
    #[default]
    Replace,
    /// Fail the report.
    Strict,
}

pub fn is_encodable(c: char) -> bool {
    let mut buf = [0u8; 4];
    let (_, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    !had_errors
}

/// Make `text` drawable with the report font.
///
/// Tabs become spaces and other control characters except newlines are
/// dropped. Unsupported characters are handled according to `policy`.
pub fn prepare_text(text: &str, policy: EncodingPolicy) -> Result<String, ExportError> {
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0usize;

    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c if is_encodable(c) => out.push(c),
            c => match policy {
                EncodingPolicy::Strict => {
                    return Err(ExportError::Encoding {
                        character: c,
                        context: snippet(text),
                    });
                }
                EncodingPolicy::Replace => {
                    out.push(REPLACEMENT_CHAR);
                    replaced += 1;
                }
            },
        }
    }

    if replaced > 0 {
        warn!(replaced, text = %snippet(text), "replaced characters the report font cannot encode");
    }

    Ok(out)
}

fn snippet(text: &str) -> String {
    const MAX: usize = 40;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    }
}

//! Hex rendering and parsing of raw tag data.
use crate::{Error, Result};

const BYTES_PER_LINE: usize = 16;
const GROUP: usize = 4;

/// Uppercase hex without separators.
pub fn to_hex(data: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(data.len() * 2);
    for b in data {
        let _ = write!(out, "{b:02X}");
    }
    out
}

/// Column header matching the layout of [`format_hex_view`].
pub fn hex_view_header() -> String {
    let groups = (0..BYTES_PER_LINE)
        .step_by(GROUP)
        .map(|g| {
            (g..g + GROUP)
                .map(|x| format!("{x:02X}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>();
    format!("{:6}{}", "", groups.join("  "))
}

/// Renders `data` as lines of `OOOO  XX XX XX XX  XX XX XX XX  ...`.
pub fn format_hex_view(data: &[u8]) -> String {
    let mut lines = Vec::with_capacity(data.len().div_ceil(BYTES_PER_LINE));
    for (idx, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let groups = chunk
            .chunks(GROUP)
            .map(|group| {
                group
                    .iter()
                    .map(|b| format!("{b:02X}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();
        lines.push(format!(
            "{:04X}  {}",
            idx * BYTES_PER_LINE,
            groups.join("  ")
        ));
    }
    lines.join("\n")
}

/// Parses text produced by [`format_hex_view`], possibly edited by hand.
///
/// Only two-character tokens are taken as bytes, so offset columns are skipped.
pub fn parse_hex_view(text: &str) -> Result<Vec<u8>> {
    text.split_whitespace()
        .filter(|token| token.len() == 2)
        .map(|token| {
            u8::from_str_radix(token, 16).map_err(|_| Error::InvalidHex("non-hex byte in view"))
        })
        .collect()
}

/// Parses free-form hex, ignoring every non-hex character.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect::<Vec<_>>();
    if digits.len() % 2 != 0 {
        return Err(Error::InvalidHex("hex data must have an even number of characters"));
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

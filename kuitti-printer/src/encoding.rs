//! Windows-1252 encoding utilities for Nordic thermal printers
//!
//! Epson-class printers ship the Windows-1252 code table as page 16
//! ("WPC1252"), which covers the Finnish/Swedish letters (ä ö å and their
//! capitals) plus the Euro sign. This module provides utilities for:
//! - Measuring receipt column widths
//! - Truncating/padding strings to column widths
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use tracing::instrument;

/// Epson code table number for Windows-1252 (ESC t n)
const CODEPAGE_WPC1252: u8 = 16;

/// Get the printed column width of a string
///
/// Every Windows-1252 character occupies exactly one column on the paper,
/// so this is the character count, not the UTF-8 byte length.
pub fn column_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width
pub fn truncate_columns(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific column width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_columns(s: &str, width: usize, align_right: bool) -> String {
    let current_width = column_width(s);
    if current_width >= width {
        return truncate_columns(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// This function preserves ASCII bytes (0x00-0x7F) exactly as is,
/// which protects ESC/POS commands from being corrupted.
/// Only bytes >= 0x80 are treated as UTF-8 sequences and converted.
///
/// Also handles:
/// - Selecting the WPC1252 code table up front (ESC t 16)
/// - Re-selecting the code table after an INIT command (ESC @),
///   which resets the printer to its default table
/// - Substituting '?' for characters outside Windows-1252
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 16);

    // Select the WPC1252 code table at the start
    result.extend_from_slice(&[0x1B, 0x74, CODEPAGE_WPC1252]);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // Check for INIT command (ESC @ = 0x1B 0x40)
        // INIT resets the code table, so it must be re-selected after
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            // Flush pending non-ASCII buffer
            flush_buffer(&mut buffer, &mut result);

            // Write INIT
            result.push(0x1B);
            result.push(0x40);

            // Re-select the code table
            result.extend_from_slice(&[0x1B, 0x74, CODEPAGE_WPC1252]);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Non-ASCII byte (part of a UTF-8 sequence)
            buffer.push(b);
        }
        i += 1;
    }

    // Flush remaining buffer
    flush_buffer(&mut buffer, &mut result);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let (encoded, _, had_errors) = encoding_rs::WINDOWS_1252.encode(&s);

    if !had_errors {
        result.extend_from_slice(&encoded);
    } else {
        // The fast path replaces unmappable characters with HTML escapes,
        // which a printer would render literally. Encode per character and
        // substitute '?' instead.
        let mut utf8 = [0u8; 4];
        for c in s.chars() {
            let (enc, _, err) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut utf8));
            if err {
                result.push(b'?');
            } else {
                result.extend_from_slice(&enc);
            }
        }
    }
    buffer.clear();
}

//! ANSI escape sequences.
//!
//! All sequences are written into an [`OutputBuffer`]; nothing here
//! touches the terminal directly.

use crate::types::{Attr, Rgba};
use super::output::OutputBuffer;

const ESC: &str = "\x1b[";

// =============================================================================
// Cursor
// =============================================================================

/// Move the cursor up `n` rows (no-op for 0).
pub fn cursor_up(output: &mut OutputBuffer, n: u16) {
    if n > 0 {
        output.push_str(&format!("{ESC}{n}A"));
    }
}

/// Move the cursor down `n` rows (no-op for 0).
pub fn cursor_down(output: &mut OutputBuffer, n: u16) {
    if n > 0 {
        output.push_str(&format!("{ESC}{n}B"));
    }
}

/// Hide the cursor.
pub fn cursor_hide(output: &mut OutputBuffer) {
    output.push_str("\x1b[?25l");
}

/// Show the cursor.
pub fn cursor_show(output: &mut OutputBuffer) {
    output.push_str("\x1b[?25h");
}

// =============================================================================
// Erasing
// =============================================================================

/// Clear the entire current line.
pub fn clear_line(output: &mut OutputBuffer) {
    output.push_str("\x1b[2K");
}

// =============================================================================
// Styling (SGR)
// =============================================================================

/// Reset all styling.
pub fn sgr_reset(output: &mut OutputBuffer) {
    output.push_str("\x1b[0m");
}

/// Write the SGR codes for a set of text attributes.
pub fn sgr_attrs(output: &mut OutputBuffer, attrs: Attr) {
    if attrs.is_empty() {
        return;
    }

    let mut codes: Vec<&str> = Vec::new();
    if attrs.contains(Attr::BOLD) {
        codes.push("1");
    }
    if attrs.contains(Attr::DIM) {
        codes.push("2");
    }
    if attrs.contains(Attr::ITALIC) {
        codes.push("3");
    }
    if attrs.contains(Attr::UNDERLINE) {
        codes.push("4");
    }
    if attrs.contains(Attr::BLINK) {
        codes.push("5");
    }
    if attrs.contains(Attr::INVERSE) {
        codes.push("7");
    }
    if attrs.contains(Attr::HIDDEN) {
        codes.push("8");
    }
    if attrs.contains(Attr::STRIKETHROUGH) {
        codes.push("9");
    }

    output.push_str(&format!("{ESC}{}m", codes.join(";")));
}

/// Write the SGR code for a foreground color.
///
/// Terminal-default colors write nothing (the terminal picks).
pub fn sgr_fg(output: &mut OutputBuffer, color: Rgba) {
    if color.is_terminal_default() {
        return;
    }
    if color.is_ansi() {
        output.push_str(&format!("{ESC}38;5;{}m", color.ansi_index()));
        return;
    }
    output.push_str(&format!("{ESC}38;2;{};{};{}m", color.r, color.g, color.b));
}

// =============================================================================
// Tests
// =============================================================================

//! Terminal State - Size signals and render mode.
//!
//! Terminal dimensions are reactive: the view derived reads them, so a
//! resize re-renders automatically.

use spark_signals::{Signal, signal};

// =============================================================================
// Render Mode
// =============================================================================

/// How frames reach the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw the frame in place (line-diff). Default.
    #[default]
    Inline,
    /// Append each frame to the scrollback, console.log style.
    Append,
}

// =============================================================================
// Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: Signal<u16> = signal(80);
    static TERMINAL_HEIGHT: Signal<u16> = signal(24);
    static RENDER_MODE: Signal<RenderMode> = signal(RenderMode::Inline);
}

/// Get the terminal width signal (for deriveds).
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|s| s.clone())
}

/// Get the terminal height signal (for deriveds).
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|s| s.clone())
}

/// Current terminal width.
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|s| s.get())
}

/// Current terminal height.
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|s| s.get())
}

/// Set the terminal size (from resize events or tests).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|s| s.set(width));
    TERMINAL_HEIGHT.with(|s| s.set(height));
}

/// Query the real terminal size and store it. Falls back to 80x24 when
/// the query fails (e.g. not a terminal).
pub fn detect_terminal_size() {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    set_terminal_size(width, height);
}

/// Get the render mode signal (for deriveds/effects).
pub fn render_mode_signal() -> Signal<RenderMode> {
    RENDER_MODE.with(|s| s.clone())
}

/// Current render mode.
pub fn render_mode() -> RenderMode {
    RENDER_MODE.with(|s| s.get())
}

/// Set the render mode. Takes effect on the next mount.
pub fn set_render_mode(mode: RenderMode) {
    RENDER_MODE.with(|s| s.set(mode));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        set_terminal_size(80, 24);
        assert_eq!(terminal_width(), 80);
        assert_eq!(terminal_height(), 24);
    }

    #[test]
    fn test_set_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
        set_terminal_size(80, 24);
    }

    #[test]
    fn test_render_mode_roundtrip() {
        assert_eq!(render_mode(), RenderMode::Inline);
        set_render_mode(RenderMode::Append);
        assert_eq!(render_mode(), RenderMode::Append);
        set_render_mode(RenderMode::Inline);
    }
}

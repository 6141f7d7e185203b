//! Input Module - Event conversion and polling.
//!
//! Bridges crossterm's event system with the keyboard module and the
//! terminal-size signals. Provides event polling, conversion, and routing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to the appropriate handler
//!
//! # Example
//!
//! ```ignore
//! use tally_tui::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! // Event loop
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};

use super::keyboard::{self, KeyState, KeyboardEvent, Modifiers};
use crate::pipeline::terminal;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the framework
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        other => format!("{other:?}"),
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state: convert_key_state(event.kind),
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
    }
}

/// Convert crossterm KeyEventKind to our KeyState
fn convert_key_state(kind: KeyEventKind) -> KeyState {
    match kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    }
}

/// Convert any crossterm event into an InputEvent
fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key_event) => InputEvent::Key(convert_key_event(key_event)),
        CrosstermEvent::Resize(width, height) => InputEvent::Resize(width, height),
        _ => InputEvent::None,
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Non-blocking event check.
///
/// Returns `Ok(None)` when no event arrived within the timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        let event = read()?;
        Ok(Some(convert_event(event)))
    } else {
        Ok(None)
    }
}

/// Blocking event read.
pub fn read_event() -> io::Result<InputEvent> {
    let event = read()?;
    Ok(convert_event(event))
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route an input event to the appropriate handler.
///
/// Key events go through the keyboard registry; resize events update the
/// terminal-size signals (which re-runs the view derived).
pub fn route_event(event: InputEvent) {
    match event {
        InputEvent::Key(key_event) => {
            keyboard::dispatch(key_event);
        }
        InputEvent::Resize(width, height) => {
            terminal::set_terminal_size(width, height);
        }
        InputEvent::None => {}
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_char_key() {
        let event = CrosstermKeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let converted = convert_key_event(event);
        assert_eq!(converted.key, "a");
        assert!(!converted.modifiers.ctrl);
        assert_eq!(converted.state, KeyState::Press);
    }

    #[test]
    fn test_convert_named_keys() {
        for (code, name) in [
            (KeyCode::Enter, "Enter"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Down, "ArrowDown"),
        ] {
            let event = CrosstermKeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(convert_key_event(event).key, name);
        }
    }

    #[test]
    fn test_convert_modifiers() {
        let event = CrosstermKeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        let converted = convert_key_event(event);
        assert!(converted.modifiers.ctrl);
        assert!(converted.modifiers.shift);
        assert!(!converted.modifiers.alt);
    }

    #[test]
    fn test_convert_resize() {
        let converted = convert_event(CrosstermEvent::Resize(120, 40));
        assert_eq!(converted, InputEvent::Resize(120, 40));
    }

    #[test]
    fn test_route_key_updates_keyboard_state() {
        keyboard::reset_keyboard_state();

        route_event(InputEvent::Key(KeyboardEvent::new("x")));
        assert_eq!(keyboard::last_key(), "x");
    }

    #[test]
    fn test_route_resize_updates_terminal_size() {
        route_event(InputEvent::Resize(100, 30));
        assert_eq!(terminal::terminal_width(), 100);
        assert_eq!(terminal::terminal_height(), 30);
    }
}

//! Bindings Module - Default key bindings.
//!
//! Wires keyboard events to counter actions and app shutdown:
//! - `+` / `=` / ArrowUp: increment
//! - `-` / ArrowDown: decrement
//! - `q` / Escape / Ctrl+C: quit
//!
//! Counter bindings are registered per component on creation; the quit
//! binding is registered on mount and cleaned up on unmount.
//!
//! # Example
//!
//! ```ignore
//! use tally_tui::state::bindings;
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = bindings::setup_quit_keys(running.clone());
//!
//! // Later, on cleanup:
//! handle.cleanup();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::keyboard;
use crate::component::counter;

/// Keys that increment a counter.
pub const INCREMENT_KEYS: [&str; 3] = ["+", "=", "ArrowUp"];

/// Keys that decrement a counter.
pub const DECREMENT_KEYS: [&str; 2] = ["-", "ArrowDown"];

// =============================================================================
// QUIT KEYS HANDLE
// =============================================================================

/// Cleanup handle for the quit key handler.
pub struct QuitKeysHandle {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl QuitKeysHandle {
    /// Remove the quit key handler.
    pub fn cleanup(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

// =============================================================================
// SETUP FUNCTIONS
// =============================================================================

/// Set up the quit keys (`q`, Escape, Ctrl+C).
/// Returns a handle for cleanup.
///
/// # Arguments
/// * `running` - Atomic bool set to false when a quit key is pressed
pub fn setup_quit_keys(running: Arc<AtomicBool>) -> QuitKeysHandle {
    let cleanup = keyboard::on(move |event| {
        let quit = (event.modifiers.ctrl && event.key == "c")
            || (!event.modifiers.ctrl && !event.modifiers.alt
                && (event.key == "q" || event.key == "Escape"));
        if quit {
            running.store(false, Ordering::SeqCst);
            true // Consume
        } else {
            false
        }
    });

    QuitKeysHandle {
        cleanup: Some(Box::new(cleanup)),
    }
}

/// Bind the default increment/decrement keys to a counter.
/// Returns a cleanup function that removes all of them.
pub fn bind_counter_keys(index: usize) -> impl FnOnce() {
    let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();

    for key in INCREMENT_KEYS {
        cleanups.push(Box::new(keyboard::on_key(key, move || {
            counter::increment(index);
            true
        })));
    }

    for key in DECREMENT_KEYS {
        cleanups.push(Box::new(keyboard::on_key(key, move || {
            counter::decrement(index);
            true
        })));
    }

    move || {
        for cleanup in cleanups {
            cleanup();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

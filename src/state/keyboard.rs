//! Keyboard Module - Keyboard event state and handler registry.
//!
//! State and handler registry for keyboard events.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to a specific key
//! - `dispatch(event)` - Route an event through the registry
//!
//! # Example
//!
//! ```ignore
//! use tally_tui::state::keyboard;
//!
//! // Subscribe to all keyboard events
//! let cleanup = keyboard::on(|event| {
//!     println!("Key: {}", event.key);
//!     false // Don't consume
//! });
//!
//! // Subscribe to a specific key
//! let cleanup = keyboard::on_key("Enter", || {
//!     println!("Enter pressed!");
//!     true // Consume event
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use spark_signals::{Signal, signal};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
///
/// Rc so dispatch can snapshot handlers and invoke them without holding
/// the registry borrow (handlers may register or remove handlers).
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for a specific key. Return true to consume the event.
pub type KeySpecificHandler = Rc<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

// Handlers are identified by a monotonically increasing id so cleanups
// can remove exactly the handler they registered.

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

/// Subscribe to all keyboard events.
/// Returns a cleanup function to unsubscribe.
pub fn on(handler: impl Fn(&KeyboardEvent) -> bool + 'static) -> impl FnOnce() {
    let id = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let id = registry.next_id();
        registry.global_handlers.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            registry.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Returns a cleanup function to unsubscribe.
pub fn on_key(key: impl Into<String>, handler: impl Fn() -> bool + 'static) -> impl FnOnce() {
    let key = key.into();
    let key_for_cleanup = key.clone();

    let id = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let id = registry.next_id();
        registry
            .key_handlers
            .entry(key)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            if let Some(handlers) = registry.key_handlers.get_mut(&key_for_cleanup) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
            }
        });
    }
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Key-specific handlers run before global handlers. Only press events
/// reach handlers; repeat/release still update the reactive state.
pub fn dispatch(event: KeyboardEvent) -> bool {
    // Always update reactive state
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if event.state != KeyState::Press {
        return false;
    }

    // Snapshot the handlers, then invoke without holding the registry
    // borrow - a handler may register or remove handlers.
    let (key_handlers, global_handlers) = REGISTRY.with(|registry| {
        let registry = registry.borrow();
        let key_handlers: Vec<KeySpecificHandler> = registry
            .key_handlers
            .get(&event.key)
            .map(|handlers| handlers.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();
        let global_handlers: Vec<KeyHandler> = registry
            .global_handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        (key_handlers, global_handlers)
    });

    for handler in key_handlers {
        if handler() {
            return true;
        }
    }

    for handler in global_handlers {
        if handler(&event) {
            return true;
        }
    }

    false
}

/// Reset all keyboard state (for testing).
pub fn reset_keyboard_state() {
    LAST_EVENT.with(|s| s.set(None));
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.global_handlers.clear();
        registry.key_handlers.clear();
    });
}

// =============================================================================
// Tests
// =============================================================================

//! View Derived - Reactive computation of the visible frame.
//!
//! Creates a Derived that recomputes the frame whenever:
//! - Any counter's value changes
//! - Counters are created or destroyed
//! - The terminal is resized
//!
//! The computation is pure: it reads signals and produces lines. All
//! side effects (actually writing to the terminal) live in the render
//! effect created by mount.

use spark_signals::{Derived, derived};

use crate::component::{counter, registry};
use crate::types::{Attr, Rgba};
use super::terminal::terminal_width_signal;

/// Help line appended under the counters.
pub const HELP_TEXT: &str = "[+/ArrowUp] increment  [-/ArrowDown] decrement  [q] quit";

// =============================================================================
// View Types
// =============================================================================

/// One styled line of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewLine {
    pub text: String,
    pub attrs: Attr,
    pub fg: Rgba,
}

impl ViewLine {
    /// Plain line with default styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: Attr::NONE,
            fg: Rgba::TERMINAL_DEFAULT,
        }
    }
}

/// The computed frame.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ViewResult {
    pub lines: Vec<ViewLine>,
    pub terminal_width: u16,
}

// =============================================================================
// View Derived
// =============================================================================

/// Truncate a line to the terminal width.
fn truncate(text: &str, width: u16) -> String {
    text.chars().take(width as usize).collect()
}

/// Create the view derived.
///
/// Returns a Derived that computes the frame and automatically re-runs
/// when any dependency changes (counter values, component add/remove,
/// terminal size).
pub fn create_view_derived() -> Derived<ViewResult> {
    let width_signal = terminal_width_signal();
    let store_version = counter::version_signal();

    derived(move || {
        // Read terminal width (creates reactive dependency)
        let width = width_signal.get();

        // Read the store version (re-runs when counters appear/disappear)
        let _ = store_version.get();

        // Read the component set (creates reactive dependency on add/remove)
        let mut indices = registry::get_allocated_indices();
        indices.sort_unstable();

        let mut lines = Vec::new();

        for index in indices {
            let Some(label) = counter::label_of(index) else {
                continue;
            };
            let Some(count_signal) = counter::count_signal_of(index) else {
                continue;
            };

            // Read the value (creates reactive dependency on this counter)
            let count = count_signal.get();

            lines.push(ViewLine {
                text: truncate(&format!("{label}: {count}"), width),
                attrs: Attr::BOLD,
                fg: Rgba::TERMINAL_DEFAULT,
            });
            lines.push(ViewLine {
                text: truncate(&format!("  double: {}", count * 2), width),
                attrs: Attr::NONE,
                fg: Rgba::CYAN,
            });
        }

        if !lines.is_empty() {
            lines.push(ViewLine {
                text: truncate(HELP_TEXT, width),
                attrs: Attr::DIM,
                fg: Rgba::TERMINAL_DEFAULT,
            });
        }

        ViewResult {
            lines,
            terminal_width: width,
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

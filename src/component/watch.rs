//! Watch - Old/new change observation for signals.
//!
//! `watch` wires a callback to a signal so it runs with `(old, new)` every
//! time the value actually changes. The first run only records the
//! baseline - the callback is not invoked for the initial value.
//!
//! Watchers run synchronously inside the mutation that triggered them,
//! before control returns to the caller.
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::signal;
//! use tally_tui::component::watch::watch;
//!
//! let count = signal(0u64);
//! let stop = watch(count.clone(), |old, new| {
//!     println!("count changed from {old} to {new}");
//! });
//!
//! count.set(1); // prints "count changed from 0 to 1"
//! stop();
//! count.set(2); // silent
//! ```

use std::cell::RefCell;

use spark_signals::{Signal, effect};

/// Watch a signal for changes.
///
/// Runs `callback(&old, &new)` whenever the signal's value changes.
/// Returns a stop function; once called, the watcher never fires again.
pub fn watch<T, F>(source: Signal<T>, callback: F) -> impl FnOnce()
where
    T: Clone + PartialEq + 'static,
    F: Fn(&T, &T) + 'static,
{
    let previous: RefCell<Option<T>> = RefCell::new(None);

    effect(move || {
        // Read creates the reactive dependency
        let current = source.get();

        // Swap the baseline before invoking the callback so a callback
        // that mutates the source re-enters with a fresh baseline.
        let old = previous.borrow_mut().replace(current.clone());

        if let Some(old) = old {
            if old != current {
                callback(&old, &current);
            }
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

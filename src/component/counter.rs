//! Counter Component - A reactive counter with lifecycle tracing.
//!
//! The counter holds one non-negative integer, mutated only by
//! `increment` and `decrement` (a no-op at zero), observed by a change
//! watcher and a derived `double` value (2 × count).
//!
//! Creation fires `before_create`/`created`; mounting fires
//! `before_mount`/`mounted`; every real mutation fires
//! `before_update`/`updated` around the synchronous watcher + render pass;
//! the returned cleanup fires `before_unmount`/`unmounted`.
//!
//! # Example
//!
//! ```ignore
//! use tally_tui::component::counter::{counter, CounterProps};
//!
//! let (handle, cleanup) = counter(CounterProps::default());
//!
//! handle.increment();
//! handle.increment();
//! assert_eq!(handle.count(), 2);
//! assert_eq!(handle.double(), 4);
//!
//! handle.decrement();
//! assert_eq!(handle.count(), 1);
//!
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Derived, Signal, derived, signal};

use super::lifecycle::{self, LifecycleHooks, LifecyclePhase};
use super::registry;
use super::trace;
use super::watch::watch;
use crate::pipeline::mount;
use crate::state::bindings;

/// Display label used when props don't provide one.
pub const DEFAULT_LABEL: &str = "Count";

/// Log target for watched counter changes.
pub const LOG_TARGET: &str = "tally_tui::counter";

// =============================================================================
// Props
// =============================================================================

/// Change callback invoked with `(old, new)` on every counter change.
pub type ChangeCallback = Rc<dyn Fn(u64, u64)>;

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

/// Counter component properties.
pub struct CounterProps {
    /// Component ID. Generated if not provided.
    pub id: Option<String>,
    /// Display label. Defaults to [`DEFAULT_LABEL`].
    pub label: Option<String>,
    /// Starting value.
    pub initial: u64,
    /// Amount added/subtracted per action. Zero is treated as 1.
    pub step: u64,
    /// Register the default increment/decrement key bindings.
    pub bind_keys: bool,
    /// Lifecycle hooks, fired per transition.
    pub hooks: LifecycleHooks,
    /// Change watcher callback (old, new).
    pub on_change: Option<ChangeCallback>,
}

impl Default for CounterProps {
    fn default() -> Self {
        Self {
            id: None,
            label: None,
            initial: 0,
            step: 1,
            bind_keys: true,
            hooks: LifecycleHooks::default(),
            on_change: None,
        }
    }
}

// =============================================================================
// Counter Store
// =============================================================================

/// Per-counter state the view and the key bindings read.
struct CounterRecord {
    label: String,
    step: u64,
    count: Signal<u64>,
}

thread_local! {
    static COUNTERS: RefCell<HashMap<usize, CounterRecord>> = RefCell::new(HashMap::new());

    /// Structural version of the store. Bumped on insert/remove so the
    /// view derived re-runs when a counter appears or disappears after
    /// its index is already in the registry set.
    static COUNTERS_VERSION: Signal<u64> = signal(0);
}

fn bump_version() {
    COUNTERS_VERSION.with(|version| version.set(version.get() + 1));
}

/// Signal that changes on every counter insert/remove.
///
/// Deriveds that iterate the store read this to pick up structural
/// changes.
pub fn version_signal() -> Signal<u64> {
    COUNTERS_VERSION.with(|version| version.clone())
}

/// Get the label for a counter index.
pub fn label_of(index: usize) -> Option<String> {
    COUNTERS.with(|counters| {
        counters.borrow().get(&index).map(|record| record.label.clone())
    })
}

/// Get the count signal for a counter index.
///
/// Reading the signal inside a derived/effect creates a dependency on
/// that counter's value.
pub fn count_signal_of(index: usize) -> Option<Signal<u64>> {
    COUNTERS.with(|counters| {
        counters.borrow().get(&index).map(|record| record.count.clone())
    })
}

fn record_parts(index: usize) -> Option<(Signal<u64>, u64)> {
    COUNTERS.with(|counters| {
        counters
            .borrow()
            .get(&index)
            .map(|record| (record.count.clone(), record.step))
    })
}

/// Reset all counter state (for testing).
pub fn reset_counter_state() {
    COUNTERS.with(|counters| counters.borrow_mut().clear());
    bump_version();
}

// =============================================================================
// Actions
// =============================================================================

/// Increment the counter at `index` by its step.
///
/// No-op for unknown indices. Saturates at `u64::MAX`.
pub fn increment(index: usize) {
    let Some((count, step)) = record_parts(index) else {
        return;
    };
    let current = count.get();
    apply(index, &count, current, current.saturating_add(step));
}

/// Decrement the counter at `index` by its step.
///
/// The counter never goes negative: at zero this is a no-op, and a step
/// larger than the current value clamps to zero.
pub fn decrement(index: usize) {
    let Some((count, step)) = record_parts(index) else {
        return;
    };
    let current = count.get();
    if current == 0 {
        return;
    }
    apply(index, &count, current, current.saturating_sub(step));
}

/// Apply a mutation through the single update path.
///
/// No-op mutations fire nothing. Real mutations fire `before_update`,
/// set the signal (watchers and the render effect run synchronously
/// inside the set), then fire `updated` - once per mutation. Update
/// hooks are re-render hooks, so they only fire while mounted.
fn apply(index: usize, count: &Signal<u64>, current: u64, new_value: u64) {
    if new_value == current {
        return;
    }

    let fire_update = lifecycle::has_mounted(index);
    if fire_update {
        lifecycle::fire(index, LifecyclePhase::BeforeUpdate);
    }

    count.set(new_value);

    if fire_update {
        lifecycle::fire(index, LifecyclePhase::Updated);
    }
}

// =============================================================================
// Counter Component
// =============================================================================

/// Handle to a live counter.
///
/// Obtained from [`counter`]; remains valid until the matching cleanup
/// runs (operations on a destroyed counter are no-ops).
pub struct CounterHandle {
    index: usize,
    count: Signal<u64>,
    double: Derived<u64>,
}

impl CounterHandle {
    /// The component index in the registry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The component ID.
    pub fn id(&self) -> Option<String> {
        registry::get_id(self.index)
    }

    /// Current value.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// The underlying count signal, for watchers and deriveds.
    pub fn count_signal(&self) -> Signal<u64> {
        self.count.clone()
    }

    /// Derived value: 2 × count, cached by the signals runtime.
    pub fn double(&self) -> u64 {
        self.double.get()
    }

    /// Add one step.
    pub fn increment(&self) {
        increment(self.index);
    }

    /// Subtract one step, clamped at zero.
    pub fn decrement(&self) {
        decrement(self.index);
    }
}

/// Create a counter component.
///
/// Fires `before_create` before state exists and `created` once the
/// count signal, the `double` derived, and the change watcher are wired
/// up. If the app is already mounted, the mount hooks fire immediately
/// so late-created counters join the live view.
///
/// Returns the handle and a cleanup function that unmounts the counter
/// and releases its index.
pub fn counter(props: CounterProps) -> (CounterHandle, Cleanup) {
    // 1. ALLOCATE INDEX + HOOKS - state does not exist yet
    let index = registry::allocate_index(props.id.as_deref());
    lifecycle::register_hooks(index, props.hooks);
    lifecycle::fire(index, LifecyclePhase::BeforeCreate);

    // 2. CREATE STATE
    let label = props.label.unwrap_or_else(|| DEFAULT_LABEL.to_string());
    let step = if props.step == 0 { 1 } else { props.step };
    let count = signal(props.initial);

    COUNTERS.with(|counters| {
        counters.borrow_mut().insert(
            index,
            CounterRecord {
                label: label.clone(),
                step,
                count: count.clone(),
            },
        );
    });
    bump_version();

    // 3. DERIVED - double = 2 × count
    let count_for_double = count.clone();
    let double: Derived<u64> =
        derived(Box::new(move || count_for_double.get() * 2) as Box<dyn Fn() -> u64>);

    // 4. WATCHER - records old → new transitions
    let on_change = props.on_change;
    let watch_label = label.clone();
    let stop_watch = watch(count.clone(), move |old: &u64, new: &u64| {
        trace::record_change(index, *old, *new);
        log::info!(target: LOG_TARGET, "{watch_label} changed from {old} to {new}");
        if let Some(callback) = &on_change {
            callback(*old, *new);
        }
    });

    lifecycle::fire(index, LifecyclePhase::Created);

    // 5. LATE MOUNT - join an already-mounted view
    if mount::is_mounted() {
        lifecycle::fire(index, LifecyclePhase::BeforeMount);
        lifecycle::fire(index, LifecyclePhase::Mounted);
    }

    // 6. KEY BINDINGS
    let keys_cleanup: Option<Box<dyn FnOnce()>> = if props.bind_keys {
        Some(Box::new(bindings::bind_counter_keys(index)))
    } else {
        None
    };

    let handle = CounterHandle {
        index,
        count,
        double,
    };

    // 7. CLEANUP
    let cleanup: Cleanup = Box::new(move || {
        // Unmount hooks only fire for components that actually mounted
        // and weren't already unmounted by the app-level unmount.
        let fire_unmount_hooks = lifecycle::has_mounted(index);
        if fire_unmount_hooks {
            lifecycle::fire(index, LifecyclePhase::BeforeUnmount);
        }

        if let Some(cleanup) = keys_cleanup {
            cleanup();
        }
        stop_watch();

        COUNTERS.with(|counters| {
            counters.borrow_mut().remove(&index);
        });
        bump_version();
        registry::release_index(index);

        if fire_unmount_hooks {
            lifecycle::fire(index, LifecyclePhase::Unmounted);
        }
        lifecycle::clear_index(index);
    });

    (handle, cleanup)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::trace::{TraceKind, take_trace};
    use crate::state::keyboard;
    use std::cell::RefCell as StdRefCell;

    fn setup() {
        registry::reset_registry();
        lifecycle::reset_lifecycle_state();
        trace::reset_trace();
        keyboard::reset_keyboard_state();
        reset_counter_state();
        mount::reset_mount_state();
    }

    fn mount_component(index: usize) {
        lifecycle::fire(index, LifecyclePhase::BeforeMount);
        lifecycle::fire(index, LifecyclePhase::Mounted);
    }

    #[test]
    fn test_increment_sequence() {
        setup();

        let (handle, cleanup) = counter(CounterProps::default());

        handle.increment();
        handle.increment();
        handle.increment();

        assert_eq!(handle.count(), 3);
        assert_eq!(handle.double(), 6);

        cleanup();
    }

    #[test]
    fn test_decrement_never_negative() {
        setup();

        let (handle, cleanup) = counter(CounterProps::default());

        handle.decrement();
        handle.decrement();
        assert_eq!(handle.count(), 0);

        handle.increment();
        handle.decrement();
        handle.decrement();
        assert_eq!(handle.count(), 0);

        cleanup();
    }

    #[test]
    fn test_decrement_step_clamps_to_zero() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            initial: 3,
            step: 5,
            ..Default::default()
        });

        handle.decrement();
        assert_eq!(handle.count(), 0);

        cleanup();
    }

    #[test]
    fn test_double_tracks_count() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            initial: 7,
            ..Default::default()
        });

        assert_eq!(handle.double(), 14);
        handle.increment();
        assert_eq!(handle.double(), 16);

        cleanup();
    }

    #[test]
    fn test_custom_step() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            step: 10,
            ..Default::default()
        });

        handle.increment();
        handle.increment();
        assert_eq!(handle.count(), 20);

        handle.decrement();
        assert_eq!(handle.count(), 10);

        cleanup();
    }

    #[test]
    fn test_zero_step_treated_as_one() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            step: 0,
            ..Default::default()
        });

        handle.increment();
        assert_eq!(handle.count(), 1);

        cleanup();
    }

    #[test]
    fn test_watcher_reports_transitions() {
        setup();

        let seen: Rc<StdRefCell<Vec<(u64, u64)>>> = Rc::new(StdRefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let (handle, cleanup) = counter(CounterProps {
            on_change: Some(Rc::new(move |old, new| {
                seen_clone.borrow_mut().push((old, new));
            })),
            ..Default::default()
        });

        handle.increment();
        handle.increment();
        handle.increment();

        assert_eq!(*seen.borrow(), vec![(0, 1), (1, 2), (2, 3)]);

        // No-op mutations don't reach the watcher
        seen.borrow_mut().clear();
        let _ = take_trace();
        handle.decrement();
        handle.decrement();
        handle.decrement();
        handle.decrement();
        assert_eq!(*seen.borrow(), vec![(3, 2), (2, 1), (1, 0)]);

        cleanup();
    }

    #[test]
    fn test_create_hooks_fire_in_order() {
        setup();

        let order: Rc<StdRefCell<Vec<&'static str>>> = Rc::new(StdRefCell::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();

        let (_handle, cleanup) = counter(CounterProps {
            hooks: LifecycleHooks {
                before_create: Some(Rc::new(move || o1.borrow_mut().push("before_create"))),
                created: Some(Rc::new(move || o2.borrow_mut().push("created"))),
                ..Default::default()
            },
            ..Default::default()
        });

        assert_eq!(*order.borrow(), vec!["before_create", "created"]);

        cleanup();
    }

    #[test]
    fn test_update_hooks_only_while_mounted() {
        setup();

        let (handle, cleanup) = counter(CounterProps::default());
        let index = handle.index();

        // Not mounted yet - mutation updates state but fires no update hooks
        handle.increment();
        let events = take_trace();
        assert!(!events.iter().any(|event| {
            matches!(event.kind, TraceKind::Hook(LifecyclePhase::BeforeUpdate))
        }));

        mount_component(index);
        let _ = take_trace();

        handle.increment();
        let events = take_trace();
        let hooks: Vec<_> = events
            .iter()
            .filter_map(|event| match event.kind {
                TraceKind::Hook(phase) => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            hooks,
            vec![LifecyclePhase::BeforeUpdate, LifecyclePhase::Updated]
        );

        cleanup();
    }

    #[test]
    fn test_update_fires_once_per_mutation() {
        setup();

        let updates = Rc::new(StdRefCell::new(0usize));
        let updates_clone = updates.clone();

        let (handle, cleanup) = counter(CounterProps {
            hooks: LifecycleHooks {
                updated: Some(Rc::new(move || *updates_clone.borrow_mut() += 1)),
                ..Default::default()
            },
            ..Default::default()
        });
        mount_component(handle.index());

        handle.increment();
        handle.increment();
        handle.decrement();
        handle.decrement();
        handle.decrement(); // no-op at zero
        assert_eq!(*updates.borrow(), 4);

        cleanup();
    }

    #[test]
    fn test_cleanup_releases_resources() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            id: Some("main".to_string()),
            ..Default::default()
        });
        let index = handle.index();
        assert!(registry::is_allocated(index));

        cleanup();

        assert!(!registry::is_allocated(index));
        assert!(label_of(index).is_none());

        // Operations on a destroyed counter are no-ops
        increment(index);
        decrement(index);
    }

    #[test]
    fn test_unmount_hooks_skip_never_mounted() {
        setup();

        let order: Rc<StdRefCell<Vec<&'static str>>> = Rc::new(StdRefCell::new(Vec::new()));
        let o1 = order.clone();

        let (_handle, cleanup) = counter(CounterProps {
            hooks: LifecycleHooks {
                before_unmount: Some(Rc::new(move || o1.borrow_mut().push("before_unmount"))),
                ..Default::default()
            },
            ..Default::default()
        });

        cleanup();

        // Never mounted - unmount hooks don't fire
        assert!(order.borrow().is_empty());
    }

    #[test]
    fn test_unmount_hooks_fire_when_mounted() {
        setup();

        let order: Rc<StdRefCell<Vec<&'static str>>> = Rc::new(StdRefCell::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();

        let (handle, cleanup) = counter(CounterProps {
            hooks: LifecycleHooks {
                before_unmount: Some(Rc::new(move || o1.borrow_mut().push("before_unmount"))),
                unmounted: Some(Rc::new(move || o2.borrow_mut().push("unmounted"))),
                ..Default::default()
            },
            ..Default::default()
        });
        mount_component(handle.index());

        cleanup();

        assert_eq!(*order.borrow(), vec!["before_unmount", "unmounted"]);
    }

    #[test]
    fn test_default_key_bindings_drive_counter() {
        setup();

        let (handle, cleanup) = counter(CounterProps::default());

        keyboard::dispatch(keyboard::KeyboardEvent::new("+"));
        keyboard::dispatch(keyboard::KeyboardEvent::new("+"));
        assert_eq!(handle.count(), 2);

        keyboard::dispatch(keyboard::KeyboardEvent::new("-"));
        assert_eq!(handle.count(), 1);

        cleanup();

        // Bindings removed with the component
        keyboard::dispatch(keyboard::KeyboardEvent::new("+"));
        assert_eq!(handle.count(), 1);
    }

    #[test]
    fn test_bind_keys_opt_out() {
        setup();

        let (handle, cleanup) = counter(CounterProps {
            bind_keys: false,
            ..Default::default()
        });

        keyboard::dispatch(keyboard::KeyboardEvent::new("+"));
        assert_eq!(handle.count(), 0);

        cleanup();
    }
}

//! Lifecycle Module - Explicit component lifecycle phases and hooks.
//!
//! Replaces framework-driven lifecycle callbacks with an explicit
//! state-update-notify model. Each component moves through the phases
//! create → mount → update* → unmount; a hook can be registered per phase
//! and fires exactly once per transition (update once per state mutation).
//!
//! Every transition is recorded in the component trace and emitted through
//! the `log` facade under the `tally_tui::lifecycle` target.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use tally_tui::component::lifecycle::{LifecycleHooks, LifecyclePhase};
//!
//! let hooks = LifecycleHooks {
//!     created: Some(Rc::new(|| println!("data is ready"))),
//!     mounted: Some(Rc::new(|| println!("attached to the terminal"))),
//!     ..Default::default()
//! };
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::registry;
use super::trace;

/// Log target for lifecycle transitions.
pub const LOG_TARGET: &str = "tally_tui::lifecycle";

// =============================================================================
// Phases
// =============================================================================

/// A point in a component's existence.
///
/// Relative order is fixed: create → mount → update* → unmount.
/// The update pair repeats once per state mutation while mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecyclePhase {
    /// Component is being initialized; state has not been created yet.
    BeforeCreate,
    /// State exists. Good time for setup logic.
    Created,
    /// About to be attached to the terminal view.
    BeforeMount,
    /// Attached and visible.
    Mounted,
    /// A state mutation is about to be applied.
    BeforeUpdate,
    /// The mutation has been applied and the view re-rendered.
    Updated,
    /// About to be detached and torn down.
    BeforeUnmount,
    /// Detached. The component is no longer part of the view.
    Unmounted,
}

impl LifecyclePhase {
    /// All phases in their relative order.
    pub const ALL: [LifecyclePhase; 8] = [
        LifecyclePhase::BeforeCreate,
        LifecyclePhase::Created,
        LifecyclePhase::BeforeMount,
        LifecyclePhase::Mounted,
        LifecyclePhase::BeforeUpdate,
        LifecyclePhase::Updated,
        LifecyclePhase::BeforeUnmount,
        LifecyclePhase::Unmounted,
    ];

    /// Stable snake_case name, used in trace output and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecyclePhase::BeforeCreate => "before_create",
            LifecyclePhase::Created => "created",
            LifecyclePhase::BeforeMount => "before_mount",
            LifecyclePhase::Mounted => "mounted",
            LifecyclePhase::BeforeUpdate => "before_update",
            LifecyclePhase::Updated => "updated",
            LifecyclePhase::BeforeUnmount => "before_unmount",
            LifecyclePhase::Unmounted => "unmounted",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Hook callback.
///
/// Rc<dyn Fn> so the registry can hand the callback out for invocation
/// without holding its borrow while user code runs.
pub type Hook = Rc<dyn Fn()>;

/// One optional callback per lifecycle phase.
///
/// All fields default to `None`; fill in only the phases you care about.
#[derive(Clone, Default)]
pub struct LifecycleHooks {
    pub before_create: Option<Hook>,
    pub created: Option<Hook>,
    pub before_mount: Option<Hook>,
    pub mounted: Option<Hook>,
    pub before_update: Option<Hook>,
    pub updated: Option<Hook>,
    pub before_unmount: Option<Hook>,
    pub unmounted: Option<Hook>,
}

impl LifecycleHooks {
    /// Get the callback registered for a phase, if any.
    pub fn hook(&self, phase: LifecyclePhase) -> Option<Hook> {
        match phase {
            LifecyclePhase::BeforeCreate => self.before_create.clone(),
            LifecyclePhase::Created => self.created.clone(),
            LifecyclePhase::BeforeMount => self.before_mount.clone(),
            LifecyclePhase::Mounted => self.mounted.clone(),
            LifecyclePhase::BeforeUpdate => self.before_update.clone(),
            LifecyclePhase::Updated => self.updated.clone(),
            LifecyclePhase::BeforeUnmount => self.before_unmount.clone(),
            LifecyclePhase::Unmounted => self.unmounted.clone(),
        }
    }
}

// =============================================================================
// State
// =============================================================================

thread_local! {
    /// Hooks registered per component index.
    static HOOKS: RefCell<HashMap<usize, LifecycleHooks>> = RefCell::new(HashMap::new());

    /// Last fired phase per component index.
    static PHASES: RefCell<HashMap<usize, LifecyclePhase>> = RefCell::new(HashMap::new());
}

/// Register lifecycle hooks for a component index.
///
/// Must happen before the first `fire` so that `before_create` is seen.
pub fn register_hooks(index: usize, hooks: LifecycleHooks) {
    HOOKS.with(|map| {
        map.borrow_mut().insert(index, hooks);
    });
}

/// Get the last fired phase for a component index.
pub fn current_phase(index: usize) -> Option<LifecyclePhase> {
    PHASES.with(|map| map.borrow().get(&index).copied())
}

/// Check if a component has been mounted and not yet begun unmounting.
///
/// Update hooks are re-render hooks; they are gated on this.
pub fn has_mounted(index: usize) -> bool {
    matches!(
        current_phase(index),
        Some(LifecyclePhase::Mounted)
            | Some(LifecyclePhase::BeforeUpdate)
            | Some(LifecyclePhase::Updated)
    )
}

/// Check if a component has fully unmounted.
pub fn is_unmounted(index: usize) -> bool {
    current_phase(index) == Some(LifecyclePhase::Unmounted)
}

// =============================================================================
// Firing
// =============================================================================

/// Fire a lifecycle phase for a component.
///
/// Records the transition in the component trace, emits a log line, and
/// invokes the registered hook (if any). The hook is cloned out of the
/// registry first, so it may freely create or destroy components itself.
pub fn fire(index: usize, phase: LifecyclePhase) {
    PHASES.with(|map| {
        map.borrow_mut().insert(index, phase);
    });

    trace::record_hook(index, phase);

    let id = registry::get_id(index).unwrap_or_else(|| format!("c{index}"));
    log::debug!(target: LOG_TARGET, "{id}: {phase}");

    let hook = HOOKS.with(|map| {
        map.borrow().get(&index).and_then(|hooks| hooks.hook(phase))
    });
    if let Some(hook) = hook {
        hook();
    }
}

/// Remove all lifecycle state for an index (after `Unmounted`).
pub fn clear_index(index: usize) {
    HOOKS.with(|map| {
        map.borrow_mut().remove(&index);
    });
    PHASES.with(|map| {
        map.borrow_mut().remove(&index);
    });
}

/// Reset all lifecycle state (for testing).
pub fn reset_lifecycle_state() {
    HOOKS.with(|map| map.borrow_mut().clear());
    PHASES.with(|map| map.borrow_mut().clear());
}

// =============================================================================
// Tests
// =============================================================================

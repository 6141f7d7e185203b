//! Component Trace - In-memory record of lifecycle transitions and
//! watched value changes.
//!
//! The trace is the observable side of the lifecycle system: every hook
//! firing and every watched counter change lands here, in order. Tests
//! assert against it; demos dump it.
//!
//! The buffer is bounded - once `TRACE_CAPACITY` events are held, the
//! oldest are dropped.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::lifecycle::LifecyclePhase;

/// Maximum number of events retained.
pub const TRACE_CAPACITY: usize = 256;

// =============================================================================
// Events
// =============================================================================

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceKind {
    /// A lifecycle hook fired.
    Hook(LifecyclePhase),
    /// A watched counter changed value.
    Change { old: u64, new: u64 },
}

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Component index the event belongs to.
    pub index: usize,
    pub kind: TraceKind,
}

// =============================================================================
// State
// =============================================================================

thread_local! {
    static TRACE: RefCell<VecDeque<TraceEvent>> = RefCell::new(VecDeque::new());
}

fn push(event: TraceEvent) {
    TRACE.with(|trace| {
        let mut trace = trace.borrow_mut();
        if trace.len() == TRACE_CAPACITY {
            trace.pop_front();
        }
        trace.push_back(event);
    });
}

/// Record a lifecycle hook firing.
pub(crate) fn record_hook(index: usize, phase: LifecyclePhase) {
    push(TraceEvent {
        index,
        kind: TraceKind::Hook(phase),
    });
}

/// Record a watched value change.
pub(crate) fn record_change(index: usize, old: u64, new: u64) {
    push(TraceEvent {
        index,
        kind: TraceKind::Change { old, new },
    });
}

// =============================================================================
// Access
// =============================================================================

/// Drain and return all recorded events, oldest first.
pub fn take_trace() -> Vec<TraceEvent> {
    TRACE.with(|trace| trace.borrow_mut().drain(..).collect())
}

/// Number of events currently held.
pub fn trace_len() -> usize {
    TRACE.with(|trace| trace.borrow().len())
}

/// Clear the trace (for testing).
pub fn reset_trace() {
    TRACE.with(|trace| trace.borrow_mut().clear());
}

// =============================================================================
// Tests
// =============================================================================

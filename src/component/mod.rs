//! Component System
//!
//! The component layer: index registry, explicit lifecycle phases and
//! hooks, change watching, the trace, and the counter component itself.

pub mod counter;
pub mod lifecycle;
pub mod registry;
pub mod trace;
pub mod watch;

// Re-exports
pub use counter::{
    Cleanup, ChangeCallback, CounterHandle, CounterProps, counter, decrement, increment,
};
pub use lifecycle::{LifecycleHooks, LifecyclePhase};
pub use registry::{
    allocate_index, get_allocated_count, get_allocated_indices, get_id, get_index, is_allocated,
    on_destroy, release_index, reset_registry,
};
pub use trace::{TraceEvent, TraceKind, take_trace, trace_len};
pub use watch::watch;

//! # tally-tui
//!
//! Reactive terminal counter component with explicit lifecycle hooks.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! A counter is one reactive signal plus a derived `double` value, observed
//! by an old/new change watcher. The component moves through explicit
//! lifecycle phases - create → mount → update* → unmount - and every
//! transition fires its hook exactly once, lands in the component trace,
//! and is emitted through the `log` facade.
//!
//! The rendering pipeline is purely derived-based:
//! ```text
//! Counter signals → viewDerived → render effect
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use tally_tui::{counter, mount, run, CounterProps};
//!
//! let (handle, cleanup) = counter(CounterProps::default());
//!
//! let app = mount()?;
//! handle.increment(); // repaints, fires before_update/updated
//! run(&app)?;         // +/- drive the counter, q quits
//!
//! app.unmount();
//! cleanup();
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr)
//! - [`component`] - Registry, lifecycle, watch, trace, the counter
//! - [`state`] - Keyboard events, key bindings, crossterm input bridge
//! - [`pipeline`] - Terminal signals, view derived, mount/unmount
//! - [`renderer`] - Inline (diff) and append renderers

pub mod component;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use component::{
    Cleanup, ChangeCallback, CounterHandle, CounterProps, LifecycleHooks, LifecyclePhase,
    TraceEvent, TraceKind, counter, decrement, increment, on_destroy, reset_registry,
    take_trace, trace_len, watch,
};

pub use pipeline::{
    MountHandle, RenderMode, ViewLine, ViewResult, create_view_derived, is_mounted, mount,
    render_mode, run, set_render_mode, set_terminal_size, terminal_height, terminal_width,
    tick, unmount,
};

pub use renderer::{AppendRenderer, InlineRenderer, OutputBuffer};

pub use state::keyboard::{KeyHandler, KeyState, KeyboardEvent, Modifiers};

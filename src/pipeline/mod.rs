//! Reactive Pipeline
//!
//! This module implements the reactive rendering pipeline that connects
//! the component system to the terminal output.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Counter signals → viewDerived → render effect
//! ```
//!
//! ## Data Flow
//!
//! 1. **viewDerived** - Reads counter signals + terminal size, returns ViewResult
//! 2. **render effect** - Monitors viewDerived, writes lines to the terminal
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: viewDerived is a pure computation
//! - **Side Effects in Effect**: Only the render effect touches the terminal
//! - **Reactive Dependencies**: Reads from signals auto-track dependencies

pub mod mount;
pub mod terminal;
pub mod view_derived;

// Re-exports
pub use mount::{MountHandle, is_mounted, mount, run, tick, unmount};
pub use terminal::{
    RenderMode, detect_terminal_size, render_mode, set_render_mode, set_terminal_size,
    terminal_height, terminal_width,
};
pub use view_derived::{HELP_TEXT, ViewLine, ViewResult, create_view_derived};

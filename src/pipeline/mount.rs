//! Mount API - Application lifecycle and render effect.
//!
//! This module provides the entry point for mounting the counter app.
//! It sets up the render effect that monitors the reactive pipeline and
//! outputs to the terminal, and it drives the mount/unmount lifecycle
//! phases for every live component.
//!
//! # Example
//!
//! ```ignore
//! use tally_tui::pipeline::mount;
//!
//! // Mount the application
//! let handle = mount::mount()?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&handle)? {
//!     // Your logic here
//! }
//!
//! // Clean up
//! handle.unmount();
//! ```

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use spark_signals::{Signal, effect, signal};

use crate::component::lifecycle::{self, LifecyclePhase};
use crate::component::registry;
use crate::renderer::{AppendRenderer, InlineRenderer};
use crate::state::bindings::{self, QuitKeysHandle};
use crate::state::input;
use super::terminal::{RenderMode, detect_terminal_size, render_mode};
use super::view_derived::create_view_derived;

// =============================================================================
// Mounted Flag
// =============================================================================

thread_local! {
    static MOUNTED: Signal<bool> = signal(false);
}

/// Check whether the app is currently mounted.
///
/// Components created while mounted fire their mount hooks immediately.
pub fn is_mounted() -> bool {
    MOUNTED.with(|s| s.get())
}

/// Reset the mounted flag (for testing).
pub fn reset_mount_state() {
    MOUNTED.with(|s| s.set(false));
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds references to:
/// - The render effect stop function
/// - The running flag (set to false on quit keys or unmount)
/// - The quit keys handle (for cleanup)
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    quit_keys: Option<QuitKeysHandle>,
}

impl std::fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountHandle")
            .field("stop_effect", &self.stop_effect.is_some())
            .field("running", &self.running.load(Ordering::SeqCst))
            .field("quit_keys", &self.quit_keys.is_some())
            .finish()
    }
}

impl MountHandle {
    /// Stop the render effect and clean up.
    ///
    /// This will:
    /// 1. Set running to false
    /// 2. Fire `before_unmount` for every mounted component
    /// 3. Clean up the quit key handler and stop the render effect
    /// 4. Fire `unmounted` and mark the app unmounted
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);

        let mut indices = registry::get_allocated_indices();
        indices.sort_unstable();

        for &index in &indices {
            if lifecycle::has_mounted(index) {
                lifecycle::fire(index, LifecyclePhase::BeforeUnmount);
            }
        }

        if let Some(handle) = self.quit_keys.take() {
            handle.cleanup();
        }

        // Stop render effect (the renderer is dropped with it and
        // restores the cursor)
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        MOUNTED.with(|s| s.set(false));

        for &index in &indices {
            if lifecycle::current_phase(index) == Some(LifecyclePhase::BeforeUnmount) {
                lifecycle::fire(index, LifecyclePhase::Unmounted);
            }
        }
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    /// Use this to trigger graceful shutdown from custom code.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        MOUNTED.with(|s| s.set(false));
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the application.
///
/// This sets up:
/// 1. Terminal size detection
/// 2. `before_mount` for every live component
/// 3. The reactive render pipeline (view derived → render effect)
/// 4. `mounted` for every live component
/// 5. Quit key handlers (q / Escape / Ctrl+C)
///
/// The initial frame is painted between the `before_mount` and `mounted`
/// hooks. Returns a MountHandle for cleanup; mounting twice is an error.
pub fn mount() -> io::Result<MountHandle> {
    if is_mounted() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "application is already mounted",
        ));
    }

    detect_terminal_size();

    let mut indices = registry::get_allocated_indices();
    indices.sort_unstable();

    for &index in &indices {
        lifecycle::fire(index, LifecyclePhase::BeforeMount);
    }

    // Create the reactive pipeline
    let view_derived = create_view_derived();

    let running = Arc::new(AtomicBool::new(true));
    let mode = render_mode();

    // Create the ONE render effect
    // Each branch needs to be boxed because effect() returns different
    // impl FnOnce() types
    let stop: Box<dyn FnOnce()> = match mode {
        RenderMode::Inline => {
            let mut renderer = InlineRenderer::new();
            renderer.begin()?;

            let running_clone = running.clone();
            let stop_fn = effect(move || {
                if !running_clone.load(Ordering::SeqCst) {
                    return;
                }

                // Read from derived (creates dependency)
                let result = view_derived.get();

                // Render to terminal (side effect!)
                let _ = renderer.render(&result);
            });
            Box::new(stop_fn)
        }
        RenderMode::Append => {
            let mut renderer = AppendRenderer::new();

            let running_clone = running.clone();
            let stop_fn = effect(move || {
                if !running_clone.load(Ordering::SeqCst) {
                    return;
                }

                let result = view_derived.get();
                let _ = renderer.render(&result);
            });
            Box::new(stop_fn)
        }
    };

    MOUNTED.with(|s| s.set(true));

    for &index in &indices {
        lifecycle::fire(index, LifecyclePhase::Mounted);
    }

    // Quit keys (q, Escape, Ctrl+C)
    let quit_keys = bindings::setup_quit_keys(running.clone());

    Ok(MountHandle {
        stop_effect: Some(stop),
        running,
        quit_keys: Some(quit_keys),
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once (non-blocking).
///
/// Call this in your main loop to process input events.
/// Returns `Ok(false)` if the application should stop running.
pub fn tick(handle: &MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    // Poll with short timeout (~60fps)
    if let Some(event) = input::poll_event(Duration::from_millis(16))? {
        input::route_event(event);
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
///
/// This function blocks until:
/// - A quit key is pressed (sets running to false)
/// - `handle.stop()` is called from a key handler or watcher
pub fn run(handle: &MountHandle) -> io::Result<()> {
    while tick(handle)? {
        // Continue processing events
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

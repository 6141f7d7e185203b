//! Counter Demo - Lifecycle hooks, watcher, and the derived double.
//!
//! Creates one counter that logs every lifecycle transition, performs a
//! few scripted mutations, then hands control to the event loop:
//! +/- (or the arrow keys) drive the counter, q quits.
//!
//! Run with: cargo run --example counter
//! Set RUST_LOG=debug to also see the library's own lifecycle log lines.

use std::rc::Rc;

use tally_tui::{
    CounterProps, LifecycleHooks, RenderMode, counter, mount, set_render_mode, unmount,
};

fn main() {
    env_logger::init();

    // Frames append below each other, console.log style
    set_render_mode(RenderMode::Append);

    let (handle, cleanup) = counter(CounterProps {
        id: Some("app".to_string()),
        hooks: LifecycleHooks {
            before_create: Some(Rc::new(|| {
                println!("before_create: initializing, counter state does not exist yet");
            })),
            created: Some(Rc::new(|| {
                println!("created: counter state is ready - a good place for setup logic");
            })),
            before_mount: Some(Rc::new(|| {
                println!("before_mount: view computed, nothing on screen yet");
            })),
            mounted: Some(Rc::new(|| {
                println!("mounted: counter is on screen - side effects are safe now");
            })),
            before_update: Some(Rc::new(|| {
                println!("before_update: a mutation is about to re-render the view");
            })),
            updated: Some(Rc::new(|| {
                println!("updated: the view reflects the new state");
            })),
            before_unmount: Some(Rc::new(|| {
                println!("before_unmount: leaving the screen - clean up listeners here");
            })),
            unmounted: Some(Rc::new(|| {
                println!("unmounted: counter is no longer part of the view");
            })),
        },
        on_change: Some(Rc::new(|old, new| {
            println!("count changed from {old} to {new}");
        })),
        ..Default::default()
    });

    // Mount and run!
    match mount() {
        Ok(app) => {
            // Scripted transitions first: three increments, one decrement
            handle.increment();
            handle.increment();
            handle.increment();
            handle.decrement();
            println!("count = {}, double = {}", handle.count(), handle.double());

            // Interactive event loop (blocks until q / Escape / Ctrl+C)
            let _ = tally_tui::run(&app);
            unmount(app);
        }
        Err(e) => {
            eprintln!("Failed to mount: {}", e);
        }
    }

    cleanup();
}

//! Full lifecycle integration: create → mount → update* → unmount.
//!
//! Drives one counter through the whole sequence using only the public
//! API and checks hook ordering, watcher transitions, and the trace.

use std::cell::RefCell;
use std::rc::Rc;

use tally_tui::component::lifecycle::Hook;
use tally_tui::{
    CounterProps, LifecycleHooks, LifecyclePhase, RenderMode, TraceKind, counter, mount,
    set_render_mode, take_trace,
};

fn record(order: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Option<Hook> {
    let order = order.clone();
    Some(Rc::new(move || order.borrow_mut().push(name)))
}

#[test]
fn counter_lifecycle_end_to_end() {
    set_render_mode(RenderMode::Append);

    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let transitions: Rc<RefCell<Vec<(u64, u64)>>> = Rc::new(RefCell::new(Vec::new()));
    let transitions_clone = transitions.clone();

    let (handle, cleanup) = counter(CounterProps {
        hooks: LifecycleHooks {
            before_create: record(&order, "before_create"),
            created: record(&order, "created"),
            before_mount: record(&order, "before_mount"),
            mounted: record(&order, "mounted"),
            before_update: record(&order, "before_update"),
            updated: record(&order, "updated"),
            before_unmount: record(&order, "before_unmount"),
            unmounted: record(&order, "unmounted"),
        },
        on_change: Some(Rc::new(move |old, new| {
            transitions_clone.borrow_mut().push((old, new));
        })),
        ..Default::default()
    });

    let app = mount().expect("mount should succeed");

    // Three increments, then one decrement
    handle.increment();
    handle.increment();
    handle.increment();
    assert_eq!(handle.count(), 3);
    assert_eq!(handle.double(), 6);
    assert_eq!(*transitions.borrow(), vec![(0, 1), (1, 2), (2, 3)]);

    handle.decrement();
    assert_eq!(handle.count(), 2);
    assert_eq!(handle.double(), 4);

    app.unmount();
    cleanup();

    // Every hook fired exactly once per transition, in relative order,
    // with one update pair per mutation.
    assert_eq!(
        *order.borrow(),
        vec![
            "before_create",
            "created",
            "before_mount",
            "mounted",
            "before_update",
            "updated",
            "before_update",
            "updated",
            "before_update",
            "updated",
            "before_update",
            "updated",
            "before_unmount",
            "unmounted",
        ]
    );

    // The trace interleaves watcher changes inside the update pairs
    let kinds: Vec<TraceKind> = take_trace().into_iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TraceKind::Hook(LifecyclePhase::BeforeCreate),
            TraceKind::Hook(LifecyclePhase::Created),
            TraceKind::Hook(LifecyclePhase::BeforeMount),
            TraceKind::Hook(LifecyclePhase::Mounted),
            TraceKind::Hook(LifecyclePhase::BeforeUpdate),
            TraceKind::Change { old: 0, new: 1 },
            TraceKind::Hook(LifecyclePhase::Updated),
            TraceKind::Hook(LifecyclePhase::BeforeUpdate),
            TraceKind::Change { old: 1, new: 2 },
            TraceKind::Hook(LifecyclePhase::Updated),
            TraceKind::Hook(LifecyclePhase::BeforeUpdate),
            TraceKind::Change { old: 2, new: 3 },
            TraceKind::Hook(LifecyclePhase::Updated),
            TraceKind::Hook(LifecyclePhase::BeforeUpdate),
            TraceKind::Change { old: 3, new: 2 },
            TraceKind::Hook(LifecyclePhase::Updated),
            TraceKind::Hook(LifecyclePhase::BeforeUnmount),
            TraceKind::Hook(LifecyclePhase::Unmounted),
        ]
    );
}

#[test]
fn decrement_at_zero_stays_at_zero() {
    set_render_mode(RenderMode::Append);

    let updates = Rc::new(RefCell::new(0usize));
    let updates_clone = updates.clone();

    let (handle, cleanup) = counter(CounterProps {
        hooks: LifecycleHooks {
            updated: Some(Rc::new(move || *updates_clone.borrow_mut() += 1)),
            ..Default::default()
        },
        ..Default::default()
    });

    let app = mount().expect("mount should succeed");

    for _ in 0..5 {
        handle.decrement();
    }

    assert_eq!(handle.count(), 0);
    assert_eq!(handle.double(), 0);
    // No mutations happened, so no update hooks fired
    assert_eq!(*updates.borrow(), 0);

    app.unmount();
    cleanup();
}

#[test]
fn increments_accumulate_exactly() {
    set_render_mode(RenderMode::Append);

    let (handle, cleanup) = counter(CounterProps::default());
    let app = mount().expect("mount should succeed");

    for _ in 0..10 {
        handle.increment();
    }
    assert_eq!(handle.count(), 10);
    assert_eq!(handle.double(), 20);

    app.unmount();
    cleanup();
}

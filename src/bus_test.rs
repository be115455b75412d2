use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::geom::{ScreenPosition, WorldPosition};

fn world_move(x: f64) -> DiagramEvent {
    DiagramEvent::WorldMouseMove(WorldPosition::new(x, 0.0))
}

// =============================================================
// Subscribe / publish
// =============================================================

#[test]
fn publish_without_subscribers_is_noop() {
    let bus = EventBus::new();
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(bus.subscriber_count(EventKind::RenderRequested), 0);
}

#[test]
fn handlers_run_in_subscription_order() {
    let bus = EventBus::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["a", "b", "c"] {
        let order = Rc::clone(&order);
        bus.subscribe(EventKind::RenderRequested, move |_| order.borrow_mut().push(tag));
    }
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn handler_sees_only_its_kind() {
    let bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        bus.subscribe(EventKind::WorldMouseMove, move |e| seen.borrow_mut().push(e.clone()));
    }
    bus.publish(DiagramEvent::RenderRequested);
    bus.publish(DiagramEvent::ScreenMouseMove(ScreenPosition::new(1.0, 1.0)));
    bus.publish(world_move(3.0));
    assert_eq!(*seen.borrow(), vec![world_move(3.0)]);
}

#[test]
fn clones_share_registry() {
    let bus = EventBus::new();
    let other = bus.clone();
    let hits = Rc::new(Cell::new(0));
    {
        let hits = Rc::clone(&hits);
        other.subscribe(EventKind::RenderRequested, move |_| hits.set(hits.get() + 1));
    }
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(hits.get(), 1);
    assert_eq!(bus.subscriber_count(EventKind::RenderRequested), 1);
}

#[test]
fn subscription_ids_are_unique() {
    let bus = EventBus::new();
    let a = bus.subscribe(EventKind::RenderRequested, |_| {});
    let b = bus.subscribe(EventKind::RenderRequested, |_| {});
    let c = bus.subscribe(EventKind::WorldMouseDragEnd, |_| {});
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn debug_reports_subscriber_total() {
    let bus = EventBus::new();
    bus.subscribe(EventKind::RenderRequested, |_| {});
    bus.subscribe(EventKind::WorldMouseMove, |_| {});
    assert_eq!(format!("{bus:?}"), "EventBus { subscribers: 2 }");
}

// =============================================================
// Unsubscribe
// =============================================================

#[test]
fn unsubscribe_stops_delivery() {
    let bus = EventBus::new();
    let hits = Rc::new(Cell::new(0));
    let id = {
        let hits = Rc::clone(&hits);
        bus.subscribe(EventKind::RenderRequested, move |_| hits.set(hits.get() + 1))
    };
    bus.publish(DiagramEvent::RenderRequested);
    assert!(bus.unsubscribe(id));
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(hits.get(), 1);
    assert_eq!(bus.subscriber_count(EventKind::RenderRequested), 0);
}

#[test]
fn unsubscribe_unknown_id_returns_false() {
    let bus = EventBus::new();
    let id = bus.subscribe(EventKind::RenderRequested, |_| {});
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
}

#[test]
fn unsubscribe_keeps_siblings() {
    let bus = EventBus::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut ids = Vec::new();
    for tag in [1, 2, 3] {
        let order = Rc::clone(&order);
        ids.push(bus.subscribe(EventKind::RenderRequested, move |_| order.borrow_mut().push(tag)));
    }
    bus.unsubscribe(ids[1]);
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(*order.borrow(), vec![1, 3]);
}

// =============================================================
// Re-entrancy
// =============================================================

#[test]
fn nested_publish_runs_depth_first() {
    let bus = EventBus::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = Rc::clone(&order);
        let inner = bus.clone();
        bus.subscribe(EventKind::WorldMouseMove, move |_| {
            order.borrow_mut().push("move:first");
            inner.publish(DiagramEvent::RenderRequested);
        });
    }
    {
        let order = Rc::clone(&order);
        bus.subscribe(EventKind::WorldMouseMove, move |_| order.borrow_mut().push("move:second"));
    }
    {
        let order = Rc::clone(&order);
        bus.subscribe(EventKind::RenderRequested, move |_| order.borrow_mut().push("render"));
    }

    bus.publish(world_move(0.0));
    assert_eq!(*order.borrow(), vec!["move:first", "render", "move:second"]);
}

#[test]
fn subscribe_during_publish_applies_to_next_publish() {
    let bus = EventBus::new();
    let late_hits = Rc::new(Cell::new(0));
    {
        let inner = bus.clone();
        let late_hits = Rc::clone(&late_hits);
        let added = Cell::new(false);
        bus.subscribe(EventKind::RenderRequested, move |_| {
            if !added.replace(true) {
                let late_hits = Rc::clone(&late_hits);
                inner.subscribe(EventKind::RenderRequested, move |_| late_hits.set(late_hits.get() + 1));
            }
        });
    }
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(late_hits.get(), 0);
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(late_hits.get(), 1);
}

#[test]
fn unsubscribe_during_publish_applies_to_next_publish() {
    let bus = EventBus::new();
    let hits = Rc::new(Cell::new(0));
    let victim = Rc::new(Cell::new(None));
    {
        let inner = bus.clone();
        let victim = Rc::clone(&victim);
        bus.subscribe(EventKind::RenderRequested, move |_| {
            if let Some(id) = victim.take() {
                inner.unsubscribe(id);
            }
        });
    }
    {
        let hits = Rc::clone(&hits);
        victim.set(Some(bus.subscribe(EventKind::RenderRequested, move |_| hits.set(hits.get() + 1))));
    }
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(hits.get(), 1);
    bus.publish(DiagramEvent::RenderRequested);
    assert_eq!(hits.get(), 1);
}

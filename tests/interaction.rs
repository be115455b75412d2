//! End-to-end pointer sessions driven through the public `Diagram` facade.
#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use diagram::input::{Button, Modifiers, WheelDelta};
use diagram::model::{Hover, Link, Node, NodeDefinition};
use diagram::{AreaSize, Diagram, DiagramEvent, EventKind, Frame, MinimapPosition, Point, Renderer, Theme};

const EPSILON: f64 = 1e-9;

// =============================================================
// Harness
// =============================================================

#[derive(Default)]
struct Frames {
    scales: Vec<f64>,
    selected: Vec<usize>,
}

struct RecordingRenderer(Rc<RefCell<Frames>>);

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        let mut frames = self.0.borrow_mut();
        frames.scales.push(frame.view.scale);
        frames.selected.push(frame.state.selected_nodes.len());
    }
}

struct Session {
    diagram: Diagram,
    events: Rc<RefCell<Vec<DiagramEvent>>>,
    frames: Rc<RefCell<Frames>>,
}

impl Session {
    fn new() -> Self {
        let frames = Rc::new(RefCell::new(Frames::default()));
        let diagram =
            Diagram::new(Theme::default(), AreaSize::new(800.0, 600.0), RecordingRenderer(Rc::clone(&frames))).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in EventKind::ALL.into_iter().filter(|k| !k.is_raw_input() && *k != EventKind::RenderRequested) {
            let events = Rc::clone(&events);
            diagram.bus().subscribe(kind, move |e| events.borrow_mut().push(e.clone()));
        }
        Self { diagram, events, frames }
    }

    fn down(&self, x: f64, y: f64) {
        self.diagram.on_pointer_down(Point::new(x, y), Button::Primary, Modifiers::default());
    }

    fn moved(&self, x: f64, y: f64) {
        self.diagram.on_pointer_move(Point::new(x, y), Modifiers::default());
    }

    fn up(&self, x: f64, y: f64) {
        self.diagram.on_pointer_up(Point::new(x, y), Button::Primary, Modifiers::default());
    }

    fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(DiagramEvent::kind).collect()
    }

    fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

fn def() -> NodeDefinition {
    NodeDefinition { kind: "type".into(), accepts_inputs: true, has_outputs: true }
}

// =============================================================
// Panning
// =============================================================

#[test]
fn drag_on_background_pans_and_ends_with_drag_end() {
    let s = Session::new();
    s.down(10.0, 10.0);
    s.moved(15.0, 10.0);
    assert_eq!(s.diagram.view().pan(), Point::new(5.0, 0.0));

    s.clear();
    s.up(15.0, 10.0);
    assert_eq!(s.kinds(), vec![EventKind::WorldMouseDragEnd, EventKind::WorldLeftMouseUp]);
    let view = s.diagram.view();
    assert!(!view.dragging_world);
    assert!(!view.dragging_minimap);
}

#[test]
fn click_without_move_has_no_drag_end() {
    let s = Session::new();
    s.down(10.0, 10.0);
    s.up(10.0, 10.0);
    assert_eq!(s.kinds(), vec![EventKind::WorldLeftMouseClick, EventKind::WorldLeftMouseUp]);
}

#[test]
fn pan_drag_across_minimap_stays_in_world() {
    let s = Session::new();
    s.down(400.0, 100.0);
    s.moved(500.0, 100.0);
    s.clear();
    // Default minimap covers x 590..790, y 10..210.
    s.moved(700.0, 100.0);
    assert_eq!(s.kinds(), vec![EventKind::WorldMouseMove, EventKind::WorldMouseDrag]);
    assert_eq!(s.diagram.view().pan(), Point::new(300.0, 0.0));
}

#[test]
fn drag_started_in_minimap_pans_only_after_leaving_it() {
    let s = Session::new();
    s.down(100.0, 100.0);
    s.up(100.0, 100.0);

    s.down(700.0, 100.0);
    s.moved(580.0, 100.0);
    assert_eq!(s.diagram.view().pan(), Point::new(0.0, 0.0));
    s.moved(560.0, 100.0);
    assert_eq!(s.diagram.view().pan(), Point::new(-20.0, 0.0));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_keeps_cursor_anchored_and_renders() {
    let s = Session::new();
    let cursor = Point::new(100.0, 50.0);
    s.diagram.on_wheel(cursor, WheelDelta { dx: 0.0, dy: 800.0 });

    let view = s.diagram.view();
    assert_eq!(view.scale, 0.3);
    assert!((view.pan_x - (100.0 / 0.3 - 100.0)).abs() < EPSILON);
    let world = s.diagram.screen_to_world(diagram::ScreenPosition::new(cursor.x, cursor.y));
    assert!((world.x - 100.0).abs() < EPSILON && (world.y - 50.0).abs() < EPSILON);
    assert_eq!(s.frames.borrow().scales.last().copied(), Some(0.3));
}

#[test]
fn zoom_in_at_max_is_noop() {
    let s = Session::new();
    s.diagram.on_wheel(Point::new(100.0, 50.0), WheelDelta { dx: 0.0, dy: -800.0 });
    let view = s.diagram.view();
    assert_eq!(view.scale, 1.0);
    assert_eq!(view.pan(), Point::new(0.0, 0.0));
}

// =============================================================
// Minimap
// =============================================================

#[test]
fn minimap_gets_exclusive_routing() {
    let s = Session::new();
    s.moved(600.0, 20.0);
    s.down(600.0, 20.0);
    assert_eq!(
        *s.events.borrow(),
        vec![
            DiagramEvent::MinimapMouseMove(MinimapPosition::new(10.0, 10.0)),
            DiagramEvent::MinimapLeftMouseClick(MinimapPosition::new(10.0, 10.0)),
        ]
    );
    assert!(s.diagram.view().last_drag_position.is_none());
}

#[test]
fn minimap_click_recenters_on_content() {
    let s = Session::new();
    s.diagram.load(vec![Node::new("n", def(), 0.0, 0.0)], Vec::new());
    // Bounds with both ports: x -18..162, y 0..48; 180 world units over 200px.
    s.down(690.0, 30.0);
    let target = Point::new(-18.0 + 100.0 * 0.9, 20.0 * 0.9);
    let center = s.diagram.world_to_screen(diagram::WorldPosition::new(target.x, target.y));
    assert!((center.x - 400.0).abs() < EPSILON);
    assert!((center.y - 300.0).abs() < EPSILON);
}

// =============================================================
// Selection and node dragging
// =============================================================

#[test]
fn select_and_drag_node() {
    let s = Session::new();
    let a = Node::new("a", def(), 100.0, 100.0);
    let b = Node::new("b", def(), 400.0, 300.0);
    let link = Link::new(a.id, b.id);
    s.diagram.load(vec![a.clone(), b.clone()], vec![link]);

    s.down(150.0, 120.0);
    s.moved(170.0, 150.0);
    s.up(170.0, 150.0);

    let state = s.diagram.state();
    assert_eq!(state.selected_nodes, vec![a.id]);
    assert_eq!(state.node(&a.id).map(Node::position), Some(Point::new(120.0, 130.0)));
    assert_eq!(state.node(&b.id).map(Node::position), Some(Point::new(400.0, 300.0)));
    assert_eq!(s.diagram.view().pan(), Point::new(0.0, 0.0));
    assert_eq!(s.frames.borrow().selected.last().copied(), Some(1));
}

#[test]
fn click_background_clears_selection() {
    let s = Session::new();
    let a = Node::new("a", def(), 100.0, 100.0);
    s.diagram.load(vec![a], Vec::new());
    s.down(150.0, 120.0);
    s.up(150.0, 120.0);
    s.down(50.0, 500.0);
    s.up(50.0, 500.0);
    assert!(s.diagram.state().selected_nodes.is_empty());
}

#[test]
fn hover_follows_pointer() {
    let s = Session::new();
    let a = Node::new("a", def(), 100.0, 100.0);
    s.diagram.load(vec![a.clone()], Vec::new());
    s.moved(150.0, 120.0);
    assert_eq!(s.diagram.state().hover.node, Some(a.id));
    s.moved(50.0, 500.0);
    assert_eq!(s.diagram.state().hover, Hover::default());
}

//! Diagram state store: owns nodes, links and the interaction state, and
//! reacts to the semantic events published by the view manager.
//!
//! | Event | Effect |
//! |-------|--------|
//! | `WorldMouseOverMove` | update hover (node, port, link) |
//! | `WorldLeftMouseClick` | select node/link, arm node dragging, or clear selection |
//! | `WorldMouseDrag` | move selected nodes when armed, otherwise pan the view |
//! | `WorldLeftMouseUp` | disarm node dragging |
//! | `WorldMouseMove` | remember the pointer position |
//! | `MinimapLeftMouseClick` | center the view on the clicked world point |
//!
//! Every change that is visible on screen is followed by `RenderRequested`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::bus::{EventBus, SubscriptionId};
use crate::consts::LINK_HIT_TOLERANCE_PX;
use crate::event::{DiagramEvent, EventKind};
use crate::geom::{DragPositions, MinimapPosition, Point, WorldPosition};
use crate::hit::{Hit, NodePart, hit_test};
use crate::minimap::MinimapProjection;
use crate::model::{Category, DiagramState, Hover, Link, LinkId, Node, NodeDefinition, NodeId};
use crate::theme::Theme;
use crate::view_manager::ViewManager;

#[derive(Debug)]
pub struct DiagramStore {
    state: RefCell<DiagramState>,
    bus: EventBus,
    view: Rc<ViewManager>,
    theme: Rc<Theme>,
    /// World point of the previous node-drag step; `Some` while a node drag is armed.
    node_drag: Cell<Option<Point>>,
    subscriptions: RefCell<Vec<SubscriptionId>>,
}

impl DiagramStore {
    #[must_use]
    pub fn new(bus: EventBus, view: Rc<ViewManager>, theme: Rc<Theme>) -> Rc<Self> {
        let store = Rc::new(Self {
            state: RefCell::new(DiagramState::default()),
            bus,
            view,
            theme,
            node_drag: Cell::new(None),
            subscriptions: RefCell::new(Vec::new()),
        });
        store.attach();
        store
    }

    fn attach(self: &Rc<Self>) {
        let ids = vec![
            self.listen(EventKind::WorldMouseOverMove, |s, e| {
                if let DiagramEvent::WorldMouseOverMove(p) = e {
                    s.mouse_over_move(*p);
                }
            }),
            self.listen(EventKind::WorldMouseMove, |s, e| {
                if let DiagramEvent::WorldMouseMove(p) = e {
                    s.state.borrow_mut().last_position = *p;
                }
            }),
            self.listen(EventKind::WorldLeftMouseClick, |s, e| {
                if let DiagramEvent::WorldLeftMouseClick { position, .. } = e {
                    s.left_mouse_click(*position);
                }
            }),
            self.listen(EventKind::WorldMouseDrag, |s, e| {
                if let DiagramEvent::WorldMouseDrag(positions) = e {
                    s.mouse_drag(*positions);
                }
            }),
            self.listen(EventKind::WorldLeftMouseUp, |s, e| {
                if let DiagramEvent::WorldLeftMouseUp(p) = e {
                    s.left_mouse_up(*p);
                }
            }),
            self.listen(EventKind::MinimapLeftMouseClick, |s, e| {
                if let DiagramEvent::MinimapLeftMouseClick(local) = e {
                    s.minimap_click(*local);
                }
            }),
        ];
        self.subscriptions.borrow_mut().extend(ids);
    }

    fn listen(self: &Rc<Self>, kind: EventKind, handler: fn(&DiagramStore, &DiagramEvent)) -> SubscriptionId {
        let weak = Rc::downgrade(self);
        self.bus.subscribe(kind, move |event| {
            if let Some(store) = weak.upgrade() {
                handler(&store, event);
            }
        })
    }

    // --- Data inputs ---

    /// Replace the diagram content. Selection and hover entries that no longer
    /// resolve are dropped.
    pub fn load(&self, nodes: Vec<Node>, links: Vec<Link>) {
        {
            let mut state = self.state.borrow_mut();
            state.nodes = nodes;
            state.links = links;
            state.prune_dangling();
            debug!(nodes = state.nodes.len(), links = state.links.len(), "diagram loaded");
        }
        self.node_drag.set(None);
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.state.borrow_mut().categories = categories;
    }

    pub fn set_definitions(&self, definitions: Vec<NodeDefinition>) {
        self.state.borrow_mut().node_definitions = definitions;
    }

    // --- Queries ---

    /// Borrow the current state. Do not hold the borrow across a publish.
    #[must_use]
    pub fn state(&self) -> Ref<'_, DiagramState> {
        self.state.borrow()
    }

    #[must_use]
    pub fn is_dragging_nodes(&self) -> bool {
        self.node_drag.get().is_some()
    }

    // --- Semantic event handlers ---

    /// Link hit tolerance in world units at the current zoom.
    fn link_tolerance(&self) -> f64 {
        self.view.view().screen_dist_to_world(LINK_HIT_TOLERANCE_PX)
    }

    fn mouse_over_move(&self, position: WorldPosition) {
        let tolerance = self.link_tolerance();
        let changed = {
            let mut state = self.state.borrow_mut();
            state.last_position = position;
            let hover = match hit_test(position.point(), &state, &self.theme, tolerance) {
                Some(Hit::Node { id, part }) => Hover {
                    node: Some(id),
                    link: None,
                    io: match part {
                        NodePart::Port(side) => Some(side),
                        NodePart::Body => None,
                    },
                },
                Some(Hit::Link { id }) => Hover { link: Some(id), ..Hover::default() },
                None => Hover::default(),
            };
            if state.hover == hover {
                false
            } else {
                state.hover = hover;
                true
            }
        };
        if changed {
            self.bus.publish(DiagramEvent::RenderRequested);
        }
    }

    fn left_mouse_click(&self, position: WorldPosition) {
        let tolerance = self.link_tolerance();
        let changed = {
            let mut state = self.state.borrow_mut();
            state.last_position = position;
            match hit_test(position.point(), &state, &self.theme, tolerance) {
                Some(Hit::Node { id, .. }) => {
                    let changed = select_node(&mut state, id, position.shift_key);
                    let armed = state.is_node_selected(&id).then_some(position.point());
                    self.node_drag.set(armed);
                    changed
                }
                Some(Hit::Link { id }) => {
                    self.node_drag.set(None);
                    select_link(&mut state, id, position.shift_key)
                }
                None => {
                    self.node_drag.set(None);
                    !position.shift_key && clear_selection(&mut state)
                }
            }
        };
        if changed {
            debug!(
                nodes = self.state.borrow().selected_nodes.len(),
                links = self.state.borrow().selected_links.len(),
                "selection changed"
            );
            self.bus.publish(DiagramEvent::RenderRequested);
        }
    }

    fn mouse_drag(&self, positions: DragPositions) {
        let Some(last) = self.node_drag.get() else {
            self.view.pan_screen(positions.without_pan);
            return;
        };
        let current = positions.calculated.point();
        let (dx, dy) = (current.x - last.x, current.y - last.y);
        {
            let mut state = self.state.borrow_mut();
            let DiagramState { nodes, selected_nodes, .. } = &mut *state;
            for node in nodes.iter_mut().filter(|n| selected_nodes.contains(&n.id)) {
                node.x += dx;
                node.y += dy;
            }
            state.last_position = positions.calculated;
        }
        self.node_drag.set(Some(current));
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    fn left_mouse_up(&self, position: WorldPosition) {
        if self.node_drag.take().is_some() {
            debug!("node drag ended");
        }
        self.state.borrow_mut().last_position = position;
    }

    fn minimap_click(&self, local: MinimapPosition) {
        let target = {
            let state = self.state.borrow();
            MinimapProjection::from_state(&state, &self.theme).map(|p| p.to_world(local))
        };
        if let Some(target) = target {
            self.view.center_pan_to(target);
        }
    }
}

impl Drop for DiagramStore {
    fn drop(&mut self) {
        for id in self.subscriptions.get_mut().drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

/// Plain click replaces the selection unless the node is already part of it;
/// shift-click toggles the node. Returns whether anything changed.
fn select_node(state: &mut DiagramState, id: NodeId, additive: bool) -> bool {
    if additive {
        if let Some(index) = state.selected_nodes.iter().position(|n| *n == id) {
            state.selected_nodes.remove(index);
        } else {
            state.selected_nodes.push(id);
        }
        return true;
    }
    if state.is_node_selected(&id) {
        return false;
    }
    state.selected_nodes = vec![id];
    state.selected_links.clear();
    true
}

fn select_link(state: &mut DiagramState, id: LinkId, additive: bool) -> bool {
    if additive {
        if let Some(index) = state.selected_links.iter().position(|l| *l == id) {
            state.selected_links.remove(index);
        } else {
            state.selected_links.push(id);
        }
        return true;
    }
    if state.selected_links == [id] && state.selected_nodes.is_empty() {
        return false;
    }
    state.selected_links = vec![id];
    state.selected_nodes.clear();
    true
}

fn clear_selection(state: &mut DiagramState) -> bool {
    if state.selected_nodes.is_empty() && state.selected_links.is_empty() {
        return false;
    }
    state.selected_nodes.clear();
    state.selected_links.clear();
    true
}

//! Routes raw screen input into world or minimap events and owns pan/zoom.
//!
//! The manager subscribes to the six `Screen*` events on construction. For
//! each one it decides which spatial region owns the pointer and publishes
//! exactly one semantic event:
//!
//! - inside the minimap and not dragging the world: `Minimap*` (or nothing
//!   for over-moves and drags)
//! - otherwise: `World*` with the point mapped through the current transform
//!
//! While a world drag is in progress, moves always go to the world, even when
//! the pointer passes over the minimap.
//!
//! All state lives in a single [`ViewState`] moved into the manager at
//! construction. Every mutating path releases its borrow before publishing so
//! handlers further down the bus can read the view back.

#[cfg(test)]
#[path = "view_manager_test.rs"]
mod view_manager_test;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::bus::{EventBus, SubscriptionId};
use crate::consts::WHEEL_SCALE_DIVISOR;
use crate::event::{DiagramEvent, EventKind};
use crate::geom::{
    AreaSize, DragPositions, MinimapPosition, Point, ScreenPosition, UnpannedPosition, WorldPosition,
};
use crate::theme::{MinimapTheme, Theme, ThemeError};
use crate::view::{MinimapRect, ViewState, clamp_scale};

/// Pan/zoom owner and raw-to-semantic event router.
#[derive(Debug)]
pub struct ViewManager {
    state: RefCell<ViewState>,
    bus: EventBus,
    minimap: MinimapTheme,
    subscriptions: RefCell<Vec<SubscriptionId>>,
}

impl ViewManager {
    /// Take ownership of `state` and start listening for raw input on `bus`.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] when the minimap geometry is unusable.
    pub fn new(state: ViewState, bus: EventBus, theme: &Theme) -> Result<Rc<Self>, ThemeError> {
        theme.minimap.validate()?;
        let manager = Rc::new(Self {
            state: RefCell::new(state),
            bus,
            minimap: theme.minimap,
            subscriptions: RefCell::new(Vec::new()),
        });
        manager.attach();
        Ok(manager)
    }

    fn attach(self: &Rc<Self>) {
        let ids = vec![
            self.listen(EventKind::ScreenMouseMove, |m, e| {
                if let DiagramEvent::ScreenMouseMove(p) = e {
                    m.mouse_move(*p);
                }
            }),
            self.listen(EventKind::ScreenMouseOverMove, |m, e| {
                if let DiagramEvent::ScreenMouseOverMove(p) = e {
                    m.mouse_over_move(*p);
                }
            }),
            self.listen(EventKind::ScreenMouseWheel, |m, e| {
                if let DiagramEvent::ScreenMouseWheel { delta, x, y } = e {
                    m.mouse_wheel(*delta, *x, *y);
                }
            }),
            self.listen(EventKind::ScreenMouseDrag, |m, e| {
                if let DiagramEvent::ScreenMouseDrag(p) = e {
                    m.mouse_drag(*p);
                }
            }),
            self.listen(EventKind::ScreenLeftMouseClick, |m, e| {
                if let DiagramEvent::ScreenLeftMouseClick(p) = e {
                    m.left_mouse_click(*p);
                }
            }),
            self.listen(EventKind::ScreenLeftMouseUp, |m, e| {
                if let DiagramEvent::ScreenLeftMouseUp(p) = e {
                    m.left_mouse_up(*p);
                }
            }),
        ];
        self.subscriptions.borrow_mut().extend(ids);
    }

    fn listen(self: &Rc<Self>, kind: EventKind, handler: fn(&ViewManager, &DiagramEvent)) -> SubscriptionId {
        let weak = Rc::downgrade(self);
        self.bus.subscribe(kind, move |event| {
            if let Some(manager) = weak.upgrade() {
                handler(&manager, event);
            }
        })
    }

    // --- Queries ---

    /// Copy of the current view state.
    #[must_use]
    pub fn view(&self) -> ViewState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn world_to_screen(&self, world: WorldPosition) -> ScreenPosition {
        self.state.borrow().world_to_screen(world)
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPosition) -> WorldPosition {
        self.state.borrow().screen_to_world(screen)
    }

    /// Minimap bounds for the current area size.
    #[must_use]
    pub fn minimap_rect(&self) -> MinimapRect {
        MinimapRect::new(self.state.borrow().area_size, &self.minimap)
    }

    /// Minimap-local coordinates of `screen`, or `None` when it is outside the minimap.
    #[must_use]
    pub fn minimap_position(&self, screen: ScreenPosition) -> Option<MinimapPosition> {
        self.minimap_rect().local_position(screen)
    }

    fn dragging_world(&self) -> bool {
        self.state.borrow().dragging_world
    }

    /// Whether `screen` belongs to the minimap rather than the world.
    fn owned_by_minimap(&self, screen: ScreenPosition) -> Option<MinimapPosition> {
        if self.dragging_world() {
            return None;
        }
        self.minimap_position(screen)
    }

    // --- Raw input handlers ---

    /// Zoom around the cursor. The world point under `(x, y)` stays put.
    pub fn mouse_wheel(&self, delta: f64, x: f64, y: f64) {
        let scale_change = delta / WHEEL_SCALE_DIVISOR;
        {
            let mut state = self.state.borrow_mut();
            let old_scale = state.scale;
            let new_scale = clamp_scale(old_scale + scale_change);
            // Pan must use the old scale, so it is updated before the scale.
            state.pan_x += x / new_scale - x / old_scale;
            state.pan_y += y / new_scale - y / old_scale;
            state.scale = new_scale;
            debug!(old_scale, new_scale, pan_x = state.pan_x, pan_y = state.pan_y, "zoom");
        }
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    pub fn mouse_move(&self, screen: ScreenPosition) {
        if let Some(local) = self.owned_by_minimap(screen) {
            self.bus.publish(DiagramEvent::MinimapMouseMove(local));
            return;
        }
        let world = self.screen_to_world(screen);
        self.bus.publish(DiagramEvent::WorldMouseMove(world));
    }

    /// Hover movement. Swallowed over the minimap; the paired move event
    /// already reported it there.
    pub fn mouse_over_move(&self, screen: ScreenPosition) {
        if self.owned_by_minimap(screen).is_some() {
            return;
        }
        let world = self.screen_to_world(screen);
        self.bus.publish(DiagramEvent::WorldMouseOverMove(world));
    }

    pub fn mouse_drag(&self, screen: ScreenPosition) {
        if self.owned_by_minimap(screen).is_some() {
            return;
        }
        let positions = {
            let state = self.state.borrow();
            let without_pan = state.screen_to_unpanned(screen);
            DragPositions {
                without_pan,
                calculated: WorldPosition {
                    x: without_pan.x - state.pan_x,
                    y: without_pan.y - state.pan_y,
                    shift_key: without_pan.shift_key,
                },
            }
        };
        self.bus.publish(DiagramEvent::WorldMouseDrag(positions));
    }

    /// Left press: a minimap click when inside the minimap, otherwise a world
    /// click that also anchors a possible pan drag.
    pub fn left_mouse_click(&self, screen: ScreenPosition) {
        if let Some(local) = self.minimap_position(screen) {
            self.bus.publish(DiagramEvent::MinimapLeftMouseClick(local));
            return;
        }
        let (position, pan) = {
            let mut state = self.state.borrow_mut();
            state.last_drag_position = Some(state.screen_to_unpanned(screen).point());
            (state.screen_to_world(screen), state.pan())
        };
        self.bus.publish(DiagramEvent::WorldLeftMouseClick { position, pan });
    }

    /// Left release: ends any world drag, drops the drag anchor and returns to idle.
    pub fn left_mouse_up(&self, screen: ScreenPosition) {
        let (was_dragging, position) = {
            let state = self.state.borrow();
            (state.dragging_world, state.screen_to_world(screen))
        };
        if was_dragging {
            debug!("world drag ended");
            self.bus.publish(DiagramEvent::WorldMouseDragEnd);
        }
        self.bus.publish(DiagramEvent::WorldLeftMouseUp(position));

        let mut state = self.state.borrow_mut();
        state.dragging_world = false;
        state.dragging_minimap = false;
        state.last_drag_position = None;
    }

    // --- Pan operations ---

    /// Pan by the distance between the last drag point and `unpanned`.
    ///
    /// Called by whoever decides a world drag is a pan. Enters the
    /// dragging-world state. With no previous drag point the delta is zero.
    pub fn pan_screen(&self, unpanned: UnpannedPosition) {
        {
            let mut state = self.state.borrow_mut();
            if !state.dragging_world {
                debug!("world drag started");
            }
            state.dragging_world = true;
            let target = unpanned.point();
            let last = state.last_drag_position.unwrap_or(target);
            state.pan_x -= last.x - target.x;
            state.pan_y -= last.y - target.y;
            state.last_drag_position = Some(target);
        }
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    /// Put `world` at the viewport origin.
    pub fn pan_to(&self, world: Point) {
        {
            let mut state = self.state.borrow_mut();
            state.pan_x = -world.x;
            state.pan_y = -world.y;
            debug!(pan_x = state.pan_x, pan_y = state.pan_y, "pan to");
        }
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    /// Put `world` at the viewport center.
    pub fn center_pan_to(&self, world: Point) {
        {
            let mut state = self.state.borrow_mut();
            state.pan_x = -world.x + state.area_size.width / 2.0;
            state.pan_y = -world.y + state.area_size.height / 2.0;
            debug!(pan_x = state.pan_x, pan_y = state.pan_y, "center pan to");
        }
        self.bus.publish(DiagramEvent::RenderRequested);
    }

    /// Host surface was resized.
    pub fn set_area_size(&self, area_size: AreaSize) {
        self.state.borrow_mut().area_size = area_size;
        self.bus.publish(DiagramEvent::RenderRequested);
    }
}

impl Drop for ViewManager {
    fn drop(&mut self) {
        for id in self.subscriptions.get_mut().drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

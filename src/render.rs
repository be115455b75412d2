//! Render dispatch: hands a read-only [`Frame`] to the host's [`Renderer`].
//!
//! Pixel output is the host's business. This module only decides *when* to
//! draw (on every `RenderRequested` and on every host `tick`) and gives the
//! renderer screen-space geometry derived from the current view.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::bus::{EventBus, SubscriptionId};
use crate::event::EventKind;
use crate::geom::{MinimapPosition, ScreenPosition, WorldPosition};
use crate::hit::{Rect, node_rect};
use crate::minimap::MinimapProjection;
use crate::model::{DiagramState, Node};
use crate::store::DiagramStore;
use crate::theme::Theme;
use crate::view::{MinimapRect, ViewState};
use crate::view_manager::ViewManager;

/// Consumer of frames. Implementations draw; they must not publish events.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Everything needed to draw one frame.
pub struct Frame<'a> {
    pub view: ViewState,
    pub state: &'a DiagramState,
    pub theme: &'a Theme,
    pub minimap: MinimapRect,
}

impl Frame<'_> {
    #[must_use]
    pub fn world_to_screen(&self, world: WorldPosition) -> ScreenPosition {
        self.view.world_to_screen(world)
    }

    /// Node body in screen pixels.
    #[must_use]
    pub fn node_screen_rect(&self, node: &Node) -> Rect {
        let rect = node_rect(node, self.theme);
        let origin = self.world_to_screen(WorldPosition::new(rect.x, rect.y));
        Rect {
            x: origin.x,
            y: origin.y,
            width: rect.width * self.view.scale,
            height: rect.height * self.view.scale,
        }
    }

    #[must_use]
    pub fn is_selected(&self, node: &Node) -> bool {
        self.state.is_node_selected(&node.id)
    }

    #[must_use]
    pub fn is_hovered(&self, node: &Node) -> bool {
        self.state.hover.node == Some(node.id)
    }

    /// Visible world rectangle in minimap-local coordinates, as `(min, max)`.
    /// `None` when there are no nodes to project against.
    #[must_use]
    pub fn minimap_viewport(&self) -> Option<(MinimapPosition, MinimapPosition)> {
        let projection = MinimapProjection::from_state(self.state, self.theme)?;
        let (min, max) = self.view.visible_world_rect();
        Some((projection.to_local(min), projection.to_local(max)))
    }
}

/// Calls the renderer on demand and on the host's frame cadence.
pub struct RenderDispatcher {
    renderer: RefCell<Box<dyn Renderer>>,
    view: Rc<ViewManager>,
    store: Rc<DiagramStore>,
    theme: Rc<Theme>,
    bus: EventBus,
    frames: Cell<u64>,
    subscription: Cell<Option<SubscriptionId>>,
}

impl RenderDispatcher {
    #[must_use]
    pub fn new(
        bus: EventBus,
        view: Rc<ViewManager>,
        store: Rc<DiagramStore>,
        theme: Rc<Theme>,
        renderer: Box<dyn Renderer>,
    ) -> Rc<Self> {
        let dispatcher = Rc::new(Self {
            renderer: RefCell::new(renderer),
            view,
            store,
            theme,
            bus,
            frames: Cell::new(0),
            subscription: Cell::new(None),
        });
        let weak = Rc::downgrade(&dispatcher);
        let id = dispatcher.bus.subscribe(EventKind::RenderRequested, move |_| {
            if let Some(dispatcher) = weak.upgrade() {
                dispatcher.draw();
            }
        });
        dispatcher.subscription.set(Some(id));
        dispatcher
    }

    /// Per-frame cadence entry point for the host.
    pub fn tick(&self) {
        self.draw();
    }

    /// Number of frames handed to the renderer so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    fn draw(&self) {
        let view = self.view.view();
        let state = self.store.state();
        let frame = Frame {
            view,
            state: &*state,
            theme: &*self.theme,
            minimap: self.view.minimap_rect(),
        };
        self.renderer.borrow_mut().render(&frame);
        self.frames.set(self.frames.get() + 1);
    }
}

impl Drop for RenderDispatcher {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.bus.unsubscribe(id);
        }
    }
}

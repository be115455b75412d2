//! Top-level diagram: wires the bus, view manager, state store, render
//! dispatcher and input adapter together for one drawing surface.

#[cfg(test)]
#[path = "diagram_test.rs"]
mod diagram_test;

use std::cell::Ref;
use std::rc::Rc;

use tracing::info;

use crate::bus::EventBus;
use crate::geom::{AreaSize, Point, ScreenPosition, WorldPosition};
use crate::input::{Button, Modifiers, PointerInput, WheelDelta};
use crate::model::{Category, DiagramState, Link, Node, NodeDefinition};
use crate::render::{RenderDispatcher, Renderer};
use crate::store::DiagramStore;
use crate::theme::{Theme, ThemeError};
use crate::view::{MinimapRect, ViewState};
use crate::view_manager::ViewManager;

/// Error returned while setting up a diagram.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// The theme is missing geometry or has unusable values.
    #[error("invalid theme: {0}")]
    Theme(#[from] ThemeError),
    /// The drawing surface has no usable size.
    #[error("invalid area size {width}x{height}: must be finite and non-negative")]
    AreaSize { width: f64, height: f64 },
}

pub struct Diagram {
    bus: EventBus,
    view: Rc<ViewManager>,
    store: Rc<DiagramStore>,
    dispatcher: Rc<RenderDispatcher>,
    input: PointerInput,
}

impl Diagram {
    /// Build a diagram for a surface of `area_size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Theme`] when the theme fails validation and
    /// [`DiagramError::AreaSize`] for a negative or non-finite surface size.
    pub fn new(theme: Theme, area_size: AreaSize, renderer: impl Renderer + 'static) -> Result<Self, DiagramError> {
        theme.validate()?;
        validate_area(area_size)?;

        let theme = Rc::new(theme);
        let bus = EventBus::new();
        let view = ViewManager::new(ViewState::new(area_size), bus.clone(), &theme)?;
        let store = DiagramStore::new(bus.clone(), Rc::clone(&view), Rc::clone(&theme));
        let dispatcher =
            RenderDispatcher::new(bus.clone(), Rc::clone(&view), Rc::clone(&store), theme, Box::new(renderer));
        let input = PointerInput::new(bus.clone());

        info!(width = area_size.width, height = area_size.height, "diagram created");
        Ok(Self { bus, view, store, dispatcher, input })
    }

    // --- Data inputs ---

    pub fn load(&self, nodes: Vec<Node>, links: Vec<Link>) {
        self.store.load(nodes, links);
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.store.set_categories(categories);
    }

    pub fn set_definitions(&self, definitions: Vec<NodeDefinition>) {
        self.store.set_definitions(definitions);
    }

    // --- Host surface ---

    /// # Errors
    ///
    /// Returns [`DiagramError::AreaSize`] and leaves the view untouched when
    /// the size is negative or non-finite.
    pub fn resize(&self, area_size: AreaSize) -> Result<(), DiagramError> {
        validate_area(area_size)?;
        self.view.set_area_size(area_size);
        Ok(())
    }

    /// Per-frame callback from the host.
    pub fn tick(&self) {
        self.dispatcher.tick();
    }

    // --- Input events ---

    pub fn on_pointer_down(&self, screen_pt: Point, button: Button, modifiers: Modifiers) {
        self.input.pointer_down(screen_pt, button, modifiers);
    }

    pub fn on_pointer_move(&self, screen_pt: Point, modifiers: Modifiers) {
        self.input.pointer_move(screen_pt, modifiers);
    }

    pub fn on_pointer_up(&self, screen_pt: Point, button: Button, modifiers: Modifiers) {
        self.input.pointer_up(screen_pt, button, modifiers);
    }

    pub fn on_wheel(&self, screen_pt: Point, delta: WheelDelta) {
        self.input.wheel(screen_pt, delta);
    }

    // --- View commands ---

    pub fn pan_to(&self, world: Point) {
        self.view.pan_to(world);
    }

    pub fn center_pan_to(&self, world: Point) {
        self.view.center_pan_to(world);
    }

    // --- Queries ---

    /// Shared bus handle, for hosts that want to observe semantic events.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view.view()
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, DiagramState> {
        self.store.state()
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPosition) -> WorldPosition {
        self.view.screen_to_world(screen)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: WorldPosition) -> ScreenPosition {
        self.view.world_to_screen(world)
    }

    #[must_use]
    pub fn minimap_rect(&self) -> MinimapRect {
        self.view.minimap_rect()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.dispatcher.frames()
    }
}

fn validate_area(area_size: AreaSize) -> Result<(), DiagramError> {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    if usable(area_size.width) && usable(area_size.height) {
        Ok(())
    } else {
        Err(DiagramError::AreaSize { width: area_size.width, height: area_size.height })
    }
}

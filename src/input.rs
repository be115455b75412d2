//! Input adapter: turns host pointer callbacks into raw `Screen*` bus events.
//!
//! The host reports pointer down/move/up and wheel with positions in surface
//! pixels. `PointerInput` tracks whether the primary button is held and
//! derives the drag/over-move distinction from it, so the view manager only
//! ever sees the six raw event kinds.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::bus::EventBus;
use crate::event::DiagramEvent;
use crate::geom::{Point, ScreenPosition};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Publishes raw input events for one drawing surface.
#[derive(Debug)]
pub struct PointerInput {
    bus: EventBus,
    primary_down: Cell<bool>,
}

impl PointerInput {
    #[must_use]
    pub fn new(bus: EventBus) -> Self {
        Self { bus, primary_down: Cell::new(false) }
    }

    pub fn pointer_down(&self, screen_pt: Point, button: Button, modifiers: Modifiers) {
        if button != Button::Primary {
            return;
        }
        self.primary_down.set(true);
        self.bus.publish(DiagramEvent::ScreenLeftMouseClick(position(screen_pt, modifiers)));
    }

    /// Every move produces `ScreenMouseMove`, followed by `ScreenMouseDrag`
    /// while the primary button is held or `ScreenMouseOverMove` otherwise.
    pub fn pointer_move(&self, screen_pt: Point, modifiers: Modifiers) {
        let p = position(screen_pt, modifiers);
        self.bus.publish(DiagramEvent::ScreenMouseMove(p));
        if self.primary_down.get() {
            self.bus.publish(DiagramEvent::ScreenMouseDrag(p));
        } else {
            self.bus.publish(DiagramEvent::ScreenMouseOverMove(p));
        }
    }

    pub fn pointer_up(&self, screen_pt: Point, button: Button, modifiers: Modifiers) {
        if button != Button::Primary {
            return;
        }
        self.primary_down.set(false);
        self.bus.publish(DiagramEvent::ScreenLeftMouseUp(position(screen_pt, modifiers)));
    }

    /// Only the vertical component zooms.
    pub fn wheel(&self, screen_pt: Point, delta: WheelDelta) {
        self.bus.publish(DiagramEvent::ScreenMouseWheel { delta: delta.dy, x: screen_pt.x, y: screen_pt.y });
    }
}

fn position(screen_pt: Point, modifiers: Modifiers) -> ScreenPosition {
    ScreenPosition::new(screen_pt.x, screen_pt.y).with_shift(modifiers.shift)
}

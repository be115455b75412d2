//! Events carried by the [`crate::bus::EventBus`].
//!
//! Raw `Screen*` events come from the input adapter in host pixels. The view
//! manager turns them into semantic `World*` / `Minimap*` events. Every
//! variant has a matching [`EventKind`] tag that the bus keys subscriptions
//! on, so a handler registered for one kind only ever sees that variant.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::geom::{DragPositions, MinimapPosition, Point, ScreenPosition, WorldPosition};

/// Every event that can travel over the bus, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DiagramEvent {
    // --- Raw input (screen space) ---
    ScreenMouseMove(ScreenPosition),
    ScreenMouseOverMove(ScreenPosition),
    ScreenMouseWheel { delta: f64, x: f64, y: f64 },
    ScreenMouseDrag(ScreenPosition),
    ScreenLeftMouseClick(ScreenPosition),
    ScreenLeftMouseUp(ScreenPosition),

    // --- Semantic (world / minimap space) ---
    WorldMouseMove(WorldPosition),
    WorldMouseOverMove(WorldPosition),
    WorldMouseDrag(DragPositions),
    /// Press in the world, with the pan offset at the moment of the press.
    WorldLeftMouseClick { position: WorldPosition, pan: Point },
    WorldLeftMouseUp(WorldPosition),
    WorldMouseDragEnd,
    MinimapMouseMove(MinimapPosition),
    MinimapLeftMouseClick(MinimapPosition),

    // --- Rendering ---
    RenderRequested,
}

/// Payload-free tag of a [`DiagramEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ScreenMouseMove,
    ScreenMouseOverMove,
    ScreenMouseWheel,
    ScreenMouseDrag,
    ScreenLeftMouseClick,
    ScreenLeftMouseUp,
    WorldMouseMove,
    WorldMouseOverMove,
    WorldMouseDrag,
    WorldLeftMouseClick,
    WorldLeftMouseUp,
    WorldMouseDragEnd,
    MinimapMouseMove,
    MinimapLeftMouseClick,
    RenderRequested,
}

impl DiagramEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ScreenMouseMove(_) => EventKind::ScreenMouseMove,
            Self::ScreenMouseOverMove(_) => EventKind::ScreenMouseOverMove,
            Self::ScreenMouseWheel { .. } => EventKind::ScreenMouseWheel,
            Self::ScreenMouseDrag(_) => EventKind::ScreenMouseDrag,
            Self::ScreenLeftMouseClick(_) => EventKind::ScreenLeftMouseClick,
            Self::ScreenLeftMouseUp(_) => EventKind::ScreenLeftMouseUp,
            Self::WorldMouseMove(_) => EventKind::WorldMouseMove,
            Self::WorldMouseOverMove(_) => EventKind::WorldMouseOverMove,
            Self::WorldMouseDrag(_) => EventKind::WorldMouseDrag,
            Self::WorldLeftMouseClick { .. } => EventKind::WorldLeftMouseClick,
            Self::WorldLeftMouseUp(_) => EventKind::WorldLeftMouseUp,
            Self::WorldMouseDragEnd => EventKind::WorldMouseDragEnd,
            Self::MinimapMouseMove(_) => EventKind::MinimapMouseMove,
            Self::MinimapLeftMouseClick(_) => EventKind::MinimapLeftMouseClick,
            Self::RenderRequested => EventKind::RenderRequested,
        }
    }

    /// Whether this is a raw input event in screen space.
    #[must_use]
    pub fn is_raw_input(&self) -> bool {
        self.kind().is_raw_input()
    }
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 15] = [
        EventKind::ScreenMouseMove,
        EventKind::ScreenMouseOverMove,
        EventKind::ScreenMouseWheel,
        EventKind::ScreenMouseDrag,
        EventKind::ScreenLeftMouseClick,
        EventKind::ScreenLeftMouseUp,
        EventKind::WorldMouseMove,
        EventKind::WorldMouseOverMove,
        EventKind::WorldMouseDrag,
        EventKind::WorldLeftMouseClick,
        EventKind::WorldLeftMouseUp,
        EventKind::WorldMouseDragEnd,
        EventKind::MinimapMouseMove,
        EventKind::MinimapLeftMouseClick,
        EventKind::RenderRequested,
    ];

    /// Whether events of this kind come straight from the input adapter.
    #[must_use]
    pub fn is_raw_input(self) -> bool {
        matches!(
            self,
            Self::ScreenMouseMove
                | Self::ScreenMouseOverMove
                | Self::ScreenMouseWheel
                | Self::ScreenMouseDrag
                | Self::ScreenLeftMouseClick
                | Self::ScreenLeftMouseUp
        )
    }
}

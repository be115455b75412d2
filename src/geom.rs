//! Positions and sizes for the three coordinate spaces.
//!
//! Screen, world and minimap coordinates are kept in distinct types so a
//! screen point can never be handed to code that expects a world point. The
//! only conversions between them live on [`crate::view::ViewState`] and
//! [`crate::view::MinimapRect`].

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A bare 2D point. Used for pan offsets, drag anchors and world geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of the host drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaSize {
    pub width: f64,
    pub height: f64,
}

impl AreaSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Raw pointer position in host-surface pixels, as delivered by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
    /// Shift was held when the event fired.
    pub shift_key: bool,
}

impl ScreenPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, shift_key: false }
    }

    #[must_use]
    pub fn with_shift(mut self, shift_key: bool) -> Self {
        self.shift_key = shift_key;
        self
    }

    #[must_use]
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Screen position divided by the zoom scale, before the pan offset is applied.
///
/// Drag anchors live in this space so that pan deltas come out in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnpannedPosition {
    pub x: f64,
    pub y: f64,
    pub shift_key: bool,
}

impl UnpannedPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, shift_key: false }
    }

    #[must_use]
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Position in the diagram's logical coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
    pub shift_key: bool,
}

impl WorldPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, shift_key: false }
    }

    #[must_use]
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Position relative to the minimap overlay's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinimapPosition {
    pub x: f64,
    pub y: f64,
}

impl MinimapPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Payload of a world drag: the same pointer in unpanned and in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragPositions {
    pub without_pan: UnpannedPosition,
    pub calculated: WorldPosition,
}

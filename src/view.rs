//! View state (pan, zoom, drag flags) and the pure coordinate transforms.
//!
//! Screen and world space are related by
//!
//! ```text
//! screen = (world + pan) * scale
//! world  = screen / scale - pan
//! ```
//!
//! so `pan` is expressed in world units. The minimap rectangle is derived
//! from the current area size on every call and never cached.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::geom::{AreaSize, MinimapPosition, Point, ScreenPosition, UnpannedPosition, WorldPosition};
use crate::theme::MinimapTheme;

/// Pan/zoom and drag state of one diagram instance.
///
/// Only [`crate::view_manager::ViewManager`] mutates this; everyone else sees
/// copies.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Zoom factor, always within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Pan offset in world units.
    pub pan_x: f64,
    pub pan_y: f64,
    pub area_size: AreaSize,
    pub dragging_world: bool,
    pub dragging_minimap: bool,
    /// Previous drag point in unpanned space.
    pub last_drag_position: Option<Point>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(AreaSize::default())
    }
}

impl ViewState {
    /// Fresh state: unit scale, zero pan, idle.
    #[must_use]
    pub fn new(area_size: AreaSize) -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            area_size,
            dragging_world: false,
            dragging_minimap: false,
            last_drag_position: None,
        }
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Map a world point onto the screen.
    #[must_use]
    pub fn world_to_screen(&self, world: WorldPosition) -> ScreenPosition {
        ScreenPosition {
            x: (world.x + self.pan_x) * self.scale,
            y: (world.y + self.pan_y) * self.scale,
            shift_key: world.shift_key,
        }
    }

    /// Map a screen point into the world. Exact inverse of [`Self::world_to_screen`].
    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPosition) -> WorldPosition {
        WorldPosition {
            x: screen.x / self.scale - self.pan_x,
            y: screen.y / self.scale - self.pan_y,
            shift_key: screen.shift_key,
        }
    }

    /// Divide by the scale without applying the pan.
    #[must_use]
    pub fn screen_to_unpanned(&self, screen: ScreenPosition) -> UnpannedPosition {
        UnpannedPosition { x: screen.x / self.scale, y: screen.y / self.scale, shift_key: screen.shift_key }
    }

    /// Convert a screen-space distance to world units.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// World-space rectangle currently visible on screen, as `(min, max)`.
    #[must_use]
    pub fn visible_world_rect(&self) -> (Point, Point) {
        let min = self.screen_to_world(ScreenPosition::new(0.0, 0.0));
        let max = self.screen_to_world(ScreenPosition::new(self.area_size.width, self.area_size.height));
        (min.point(), max.point())
    }
}

/// Clamp a candidate scale into the allowed zoom range.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Screen-space bounds of the minimap overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl MinimapRect {
    /// Square of `theme.size`, inset by `theme.margin` from the right and top
    /// edges of an area of the given size.
    #[must_use]
    pub fn new(area_size: AreaSize, theme: &MinimapTheme) -> Self {
        Self {
            left: area_size.width - theme.size - theme.margin,
            right: area_size.width - theme.margin,
            top: theme.margin,
            bottom: theme.margin + theme.size,
        }
    }

    /// Strict containment: points on the border are outside.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }

    /// Minimap-local coordinates for a screen point, or `None` when outside.
    #[must_use]
    pub fn local_position(&self, screen: ScreenPosition) -> Option<MinimapPosition> {
        if !self.contains(screen.x, screen.y) {
            return None;
        }
        Some(MinimapPosition::new(screen.x - self.left, screen.y - self.top))
    }
}

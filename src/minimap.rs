//! Projection between minimap-local coordinates and world coordinates.
//!
//! The minimap shows the bounding box of every node, scaled uniformly so the
//! longer side fills the minimap square. The projection is rebuilt from the
//! current nodes whenever it is needed.

#[cfg(test)]
#[path = "minimap_test.rs"]
mod minimap_test;

use crate::geom::{MinimapPosition, Point};
use crate::hit::{Rect, node_bounds};
use crate::model::DiagramState;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    /// World-space bounds of the diagram content.
    pub bounds: Rect,
    /// Minimap pixels per world unit.
    pub scale: f64,
}

impl MinimapProjection {
    /// Projection for the current diagram content. `None` when there are no nodes.
    #[must_use]
    pub fn from_state(state: &DiagramState, theme: &Theme) -> Option<Self> {
        let mut rects = state.nodes.iter().map(|n| node_bounds(n, theme));
        let first = rects.next()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x + first.width, first.y + first.height);
        for r in rects {
            min_x = min_x.min(r.x);
            min_y = min_y.min(r.y);
            max_x = max_x.max(r.x + r.width);
            max_y = max_y.max(r.y + r.height);
        }
        let bounds = Rect { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y };
        Some(Self::new(bounds, theme.minimap.size))
    }

    /// Fit `bounds` into a square of `size` pixels.
    #[must_use]
    pub fn new(bounds: Rect, size: f64) -> Self {
        let extent = bounds.width.max(bounds.height);
        let scale = if extent > 0.0 { size / extent } else { 1.0 };
        Self { bounds, scale }
    }

    #[must_use]
    pub fn to_world(&self, local: MinimapPosition) -> Point {
        Point::new(self.bounds.x + local.x / self.scale, self.bounds.y + local.y / self.scale)
    }

    #[must_use]
    pub fn to_local(&self, world: Point) -> MinimapPosition {
        MinimapPosition::new((world.x - self.bounds.x) * self.scale, (world.y - self.bounds.y) * self.scale)
    }
}

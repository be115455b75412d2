//! Hit-testing in world space against nodes, their ports and links.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::model::{DiagramState, Link, LinkId, Node, NodeId, PortSide};
use crate::theme::Theme;

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePart {
    Body,
    Port(PortSide),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Node { id: NodeId, part: NodePart },
    Link { id: LinkId },
}

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Body rectangle of `node`.
#[must_use]
pub fn node_rect(node: &Node, theme: &Theme) -> Rect {
    Rect { x: node.x, y: node.y, width: theme.node.width, height: theme.node.height }
}

/// Rectangle of one port of `node`, or `None` if the node has no such port.
#[must_use]
pub fn port_rect(node: &Node, side: PortSide, theme: &Theme) -> Option<Rect> {
    let body = node_rect(node, theme);
    let x = match side {
        PortSide::Input if node.has_input_port() => body.x - theme.port.width,
        PortSide::Output if node.has_output_port() => body.x + body.width,
        _ => return None,
    };
    Some(Rect { x, y: body.y, width: theme.port.width, height: body.height })
}

/// Node body plus whichever ports it has.
#[must_use]
pub fn node_bounds(node: &Node, theme: &Theme) -> Rect {
    let body = node_rect(node, theme);
    let left = port_rect(node, PortSide::Input, theme).map_or(body.x, |r| r.x);
    let right = port_rect(node, PortSide::Output, theme).map_or(body.x + body.width, |r| r.x + r.width);
    Rect { x: left, y: body.y, width: right - left, height: body.height }
}

/// World-space segment a link is drawn along: output port center to input port center.
///
/// Falls back to the body edge when a port is not declared. `None` when an
/// endpoint node is missing.
#[must_use]
pub fn link_endpoints(link: &Link, state: &DiagramState, theme: &Theme) -> Option<(Point, Point)> {
    let from = state.node(&link.output)?;
    let to = state.node(&link.input)?;
    let start = port_rect(from, PortSide::Output, theme).map_or_else(
        || {
            let body = node_rect(from, theme);
            Point::new(body.x + body.width, body.center().y)
        },
        |r| r.center(),
    );
    let end = port_rect(to, PortSide::Input, theme).map_or_else(
        || Point::new(to.x, node_rect(to, theme).center().y),
        |r| r.center(),
    );
    Some((start, end))
}

/// Distance from `pt` to the segment `a`-`b`.
#[must_use]
pub fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return pt.distance(a);
    }
    let t = (((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    pt.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Topmost node part under `world_pt`. Later nodes are drawn on top, so they win.
#[must_use]
pub fn hit_node(world_pt: Point, state: &DiagramState, theme: &Theme) -> Option<(NodeId, NodePart)> {
    state.nodes.iter().rev().find_map(|node| {
        if node_rect(node, theme).contains(world_pt) {
            return Some((node.id, NodePart::Body));
        }
        [PortSide::Input, PortSide::Output].into_iter().find_map(|side| {
            port_rect(node, side, theme)
                .filter(|r| r.contains(world_pt))
                .map(|_| (node.id, NodePart::Port(side)))
        })
    })
}

/// Closest link within `tolerance` world units of `world_pt`.
#[must_use]
pub fn hit_link(world_pt: Point, state: &DiagramState, theme: &Theme, tolerance: f64) -> Option<LinkId> {
    let mut best: Option<(LinkId, f64)> = None;
    for link in &state.links {
        let Some((a, b)) = link_endpoints(link, state, theme) else {
            continue;
        };
        let dist = distance_to_segment(world_pt, a, b);
        if dist <= tolerance && best.is_none_or(|(_, d)| dist < d) {
            best = Some((link.id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Nodes take precedence over links. `link_tolerance` is in world units.
#[must_use]
pub fn hit_test(world_pt: Point, state: &DiagramState, theme: &Theme, link_tolerance: f64) -> Option<Hit> {
    if let Some((id, part)) = hit_node(world_pt, state, theme) {
        return Some(Hit::Node { id, part });
    }
    hit_link(world_pt, state, theme, link_tolerance).map(|id| Hit::Link { id })
}

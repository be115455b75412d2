//! Diagram data model: nodes, links, categories and the interaction state
//! (selection, hover) that the renderer reads every frame.
//!
//! Node positions are in world coordinates and refer to the top-left corner
//! of the node body; the body size comes from the theme, not the node.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Point, WorldPosition};

/// Unique identifier for a node.
pub type NodeId = Uuid;

/// Unique identifier for a link.
pub type LinkId = Uuid;

/// Template a node is instantiated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Type label shown above the node, e.g. `"type"` or `"input"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub accepts_inputs: bool,
    #[serde(default)]
    pub has_outputs: bool,
}

/// A named group of node definitions, used by the host's "add node" menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub definitions: Vec<String>,
}

/// A node placed on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub definition: NodeDefinition,
    /// Left edge of the node body in world coordinates.
    pub x: f64,
    /// Top edge of the node body in world coordinates.
    pub y: f64,
    /// Free-form option labels rendered under the node.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, definition: NodeDefinition, x: f64, y: f64) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), definition, x, y, options: Vec::new() }
    }

    #[must_use]
    pub fn has_input_port(&self) -> bool {
        self.definition.accepts_inputs
    }

    #[must_use]
    pub fn has_output_port(&self) -> bool {
        self.definition.has_outputs
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Directed connection from the output port of `output` to the input port of `input`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    /// Node whose output port the link starts at.
    pub output: NodeId,
    /// Node whose input port the link ends at.
    pub input: NodeId,
}

impl Link {
    #[must_use]
    pub fn new(output: NodeId, input: NodeId) -> Self {
        Self { id: Uuid::new_v4(), output, input }
    }
}

/// Which port of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortSide {
    Input,
    Output,
}

/// What the pointer is currently over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub node: Option<NodeId>,
    pub link: Option<LinkId>,
    /// Port of `node` under the pointer, if any.
    pub io: Option<PortSide>,
}

/// Everything the renderer needs besides the view transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramState {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub categories: Vec<Category>,
    pub node_definitions: Vec<NodeDefinition>,
    pub selected_nodes: Vec<NodeId>,
    pub selected_links: Vec<LinkId>,
    pub hover: Hover,
    /// Last world position the pointer was seen at.
    pub last_position: WorldPosition,
}

impl DiagramState {
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    #[must_use]
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == *id)
    }

    #[must_use]
    pub fn is_node_selected(&self, id: &NodeId) -> bool {
        self.selected_nodes.contains(id)
    }

    #[must_use]
    pub fn is_link_selected(&self, id: &LinkId) -> bool {
        self.selected_links.contains(id)
    }

    /// Drop selection and hover entries that point at missing nodes or links.
    pub fn prune_dangling(&mut self) {
        let nodes = &self.nodes;
        let links = &self.links;
        self.selected_nodes.retain(|id| nodes.iter().any(|n| n.id == *id));
        self.selected_links.retain(|id| links.iter().any(|l| l.id == *id));
        if self.hover.node.is_some_and(|id| !nodes.iter().any(|n| n.id == id)) {
            self.hover.node = None;
            self.hover.io = None;
        }
        if self.hover.link.is_some_and(|id| !links.iter().any(|l| l.id == id)) {
            self.hover.link = None;
        }
    }
}

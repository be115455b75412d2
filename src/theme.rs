//! Theme configuration consumed by the view manager, hit-testing and the renderer.
//!
//! The theme is read-only once a diagram is constructed. Geometry that the
//! coordinate logic depends on (minimap placement, node and port sizes) is
//! validated up front so a broken theme fails diagram initialization instead
//! of producing nonsense coordinates per event.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Error raised while parsing or validating a [`Theme`].
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme document is not valid JSON or misses a required field.
    #[error("failed to parse theme: {0}")]
    Parse(#[from] serde_json::Error),
    /// `minimap.size` must be finite and greater than zero.
    #[error("invalid minimap size {0}: must be finite and positive")]
    MinimapSize(f64),
    /// `minimap.margin` must be finite and not negative.
    #[error("invalid minimap margin {0}: must be finite and non-negative")]
    MinimapMargin(f64),
    /// A node or port dimension is not usable.
    #[error("invalid {field} {value}: must be finite and {requirement}")]
    Geometry { field: &'static str, value: f64, requirement: &'static str },
}

/// Placement of the minimap overlay, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapTheme {
    /// Edge length of the square minimap.
    pub size: f64,
    /// Inset from the viewport edges.
    pub margin: f64,
}

impl Default for MinimapTheme {
    fn default() -> Self {
        Self { size: 200.0, margin: 10.0 }
    }
}

impl MinimapTheme {
    /// # Errors
    ///
    /// Returns [`ThemeError::MinimapSize`] or [`ThemeError::MinimapMargin`]
    /// when either dimension cannot describe a rectangle.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ThemeError::MinimapSize(self.size));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ThemeError::MinimapMargin(self.margin));
        }
        Ok(())
    }
}

/// Text styling for node option labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeOptionsTheme {
    pub font_size: f64,
}

impl Default for NodeOptionsTheme {
    fn default() -> Self {
        Self { font_size: 10.0 }
    }
}

/// Node box geometry in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTheme {
    pub width: f64,
    pub height: f64,
    pub name_size: f64,
    pub type_size: f64,
    pub options: NodeOptionsTheme,
}

impl Default for NodeTheme {
    fn default() -> Self {
        Self { width: 144.0, height: 48.0, name_size: 14.0, type_size: 10.0, options: NodeOptionsTheme::default() }
    }
}

/// Port geometry in world units. Ports sit flush against the node's left
/// (input) and right (output) edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortTheme {
    pub width: f64,
    /// Visual separator drawn between a port and the node body.
    pub gap: f64,
}

impl Default for PortTheme {
    fn default() -> Self {
        Self { width: 18.0, gap: 1.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeColors {
    pub background: String,
    pub selected: String,
    pub name: String,
    /// Per node-type label color, keyed by node definition type.
    pub types: HashMap<String, String>,
    /// Per option label color.
    pub options: HashMap<String, String>,
}

impl Default for NodeColors {
    fn default() -> Self {
        Self {
            background: "#2A2A2A".into(),
            selected: "#3D3D3D".into(),
            name: "#F2F2F2".into(),
            types: HashMap::new(),
            options: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortColors {
    pub background: String,
    pub background_active: String,
    pub button: String,
}

impl Default for PortColors {
    fn default() -> Self {
        Self { background: "#1C1C1C".into(), background_active: "#2F6DB5".into(), button: "#F2F2F2".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    pub background: String,
    pub link: String,
    pub link_selected: String,
    pub minimap_background: String,
    pub minimap_viewport: String,
    pub node: NodeColors,
    pub port: PortColors,
}

impl Default for ColorsTheme {
    fn default() -> Self {
        Self {
            background: "#161616".into(),
            link: "#6E6E6E".into(),
            link_selected: "#F2F2F2".into(),
            minimap_background: "#00000080".into(),
            minimap_viewport: "#FFFFFF33".into(),
            node: NodeColors::default(),
            port: PortColors::default(),
        }
    }
}

/// Complete diagram theme.
///
/// `minimap` is required in serialized form; every other section falls back
/// to its default when absent.
///
/// `node.name_size`, `node.type_size`, `node.options.font_size` and `port.gap`
/// are not read by this crate; they reach the [`Renderer`](crate::render::Renderer)
/// through [`Frame::theme`](crate::render::Frame::theme).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Theme {
    pub minimap: MinimapTheme,
    #[serde(default)]
    pub node: NodeTheme,
    #[serde(default)]
    pub port: PortTheme,
    #[serde(default)]
    pub colors: ColorsTheme,
}

impl Theme {
    /// Parse a theme from JSON and validate its geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Parse`] for malformed JSON or a missing minimap
    /// section, and a geometry variant when validation fails.
    pub fn from_json_str(raw: &str) -> Result<Self, ThemeError> {
        let theme: Self = serde_json::from_str(raw)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Check every dimension the coordinate logic relies on.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ThemeError> {
        self.minimap.validate()?;
        positive("node.width", self.node.width)?;
        positive("node.height", self.node.height)?;
        non_negative("port.width", self.port.width)?;
        non_negative("port.gap", self.port.gap)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ThemeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ThemeError::Geometry { field, value, requirement: "positive" })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ThemeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ThemeError::Geometry { field, value, requirement: "non-negative" })
    }
}

#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_theme_is_valid() {
    let theme = Theme::default();
    assert!(theme.validate().is_ok());
    assert_eq!(theme.minimap.size, 200.0);
    assert_eq!(theme.minimap.margin, 10.0);
    assert_eq!(theme.node.width, 144.0);
    assert_eq!(theme.port.width, 18.0);
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_minimal_theme_fills_defaults() {
    let theme = Theme::from_json_str(r#"{"minimap":{"size":150,"margin":4}}"#).unwrap();
    assert_eq!(theme.minimap, MinimapTheme { size: 150.0, margin: 4.0 });
    assert_eq!(theme.node, NodeTheme::default());
    assert_eq!(theme.colors, ColorsTheme::default());
}

#[test]
fn parse_partial_sections() {
    let raw = r##"{
        "minimap": {"size": 100, "margin": 0},
        "node": {"width": 200},
        "colors": {"link": "#ff0000", "node": {"types": {"input": "#00ff00"}}}
    }"##;
    let theme = Theme::from_json_str(raw).unwrap();
    assert_eq!(theme.node.width, 200.0);
    assert_eq!(theme.node.height, 48.0);
    assert_eq!(theme.colors.link, "#ff0000");
    assert_eq!(theme.colors.node.types.get("input").map(String::as_str), Some("#00ff00"));
    assert_eq!(theme.colors.node.background, NodeColors::default().background);
}

#[test]
fn parse_requires_minimap() {
    let err = Theme::from_json_str(r#"{"node":{"width":10}}"#).unwrap_err();
    assert!(matches!(err, ThemeError::Parse(_)));
}

#[test]
fn parse_rejects_malformed_json() {
    let err = Theme::from_json_str("{minimap").unwrap_err();
    assert!(matches!(err, ThemeError::Parse(_)));
}

#[test]
fn parse_validates_geometry() {
    let err = Theme::from_json_str(r#"{"minimap":{"size":-5,"margin":10}}"#).unwrap_err();
    assert!(matches!(err, ThemeError::MinimapSize(v) if v == -5.0));
}

// =============================================================
// Validation
// =============================================================

#[test]
fn minimap_margin_zero_is_allowed() {
    assert!(MinimapTheme { size: 1.0, margin: 0.0 }.validate().is_ok());
}

#[test]
fn minimap_rejects_non_finite() {
    assert!(matches!(
        MinimapTheme { size: f64::INFINITY, margin: 0.0 }.validate(),
        Err(ThemeError::MinimapSize(_))
    ));
    assert!(matches!(
        MinimapTheme { size: 10.0, margin: -1.0 }.validate(),
        Err(ThemeError::MinimapMargin(_))
    ));
}

#[test]
fn node_size_must_be_positive() {
    let mut theme = Theme::default();
    theme.node.height = 0.0;
    let err = theme.validate().unwrap_err();
    assert!(matches!(err, ThemeError::Geometry { field: "node.height", .. }));
    assert_eq!(err.to_string(), "invalid node.height 0: must be finite and positive");
}

#[test]
fn port_width_may_be_zero_but_not_negative() {
    let mut theme = Theme::default();
    theme.port.width = 0.0;
    assert!(theme.validate().is_ok());
    theme.port.gap = -0.5;
    assert!(matches!(theme.validate(), Err(ThemeError::Geometry { field: "port.gap", .. })));
}

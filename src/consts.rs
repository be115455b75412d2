//! Shared numeric constants for the diagram crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom scale.
pub const MIN_SCALE: f64 = 0.3;

/// Largest allowed zoom scale.
pub const MAX_SCALE: f64 = 1.0;

/// Wheel delta that changes the scale by exactly 1.0. Negative so that
/// scrolling up (negative delta) zooms in.
pub const WHEEL_SCALE_DIVISOR: f64 = -800.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Maximum on-screen distance in pixels between the pointer and a link segment
/// for the link to count as hit. Converted to world units at the current scale.
pub const LINK_HIT_TOLERANCE_PX: f64 = 6.0;

//! Shared constants for the scene crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in scene units.
pub const DEFAULT_WIDTH: u32 = 800;

/// Default canvas height in scene units.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Neutral gray used for a fresh or cleared canvas.
pub const NEUTRAL_BACKGROUND: &str = "#f5f5f5";

// ── Object defaults ─────────────────────────────────────────────

/// Fill applied when an object is created without one.
pub const DEFAULT_FILL: &str = "rgb(0,0,0)";

/// Stroke width of a freshly created object.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

// ── Thumbnails ──────────────────────────────────────────────────

/// Prefix of the data token returned by thumbnail export.
pub const SVG_DATA_PREFIX: &str = "data:image/svg+xml;utf8,";

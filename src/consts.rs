//! Shared numeric constants for the engine core.

// ── Grid ────────────────────────────────────────────────────────

/// Edge length of one map tile in stage pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Default stage width in tiles.
pub const DEFAULT_STAGE_WIDTH_TILES: usize = 20;

/// Default stage height in tiles.
pub const DEFAULT_STAGE_HEIGHT_TILES: usize = 15;

// ── Input ───────────────────────────────────────────────────────

/// Key name (as reported by the browser) that requests a screenshot.
pub const DEFAULT_SCREENSHOT_KEY: &str = "F9";

// ── Debug rendering ─────────────────────────────────────────────

/// Clear color used when no stage background is configured.
pub const DEFAULT_BACKGROUND: &str = "#000000";

/// Outline color for actors drawn without a sprite.
pub const DEBUG_OUTLINE_COLOR: &str = "#FF00FF";

/// Color of the dot marking a collider's origin.
pub const DEBUG_ORIGIN_COLOR: &str = "#FFFF00";

/// Radius of the origin dot in pixels.
pub const DEBUG_ORIGIN_RADIUS: f64 = 2.0;

/// Color of the id label drawn over debug entities.
pub const DEBUG_TEXT_COLOR: &str = "#FFFFFF";

/// Vertical gap between a debug entity's top edge and its id label.
pub const DEBUG_LABEL_OFFSET: f64 = 4.0;

//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed units of the quilt grid.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Quilt Planner";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "quilt-planner";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "QuiltPlanner";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "QUILT_PLANNER_CONFIG_DIR";

/// Screen units per grid cell (one inch) at 100 % zoom.
pub const PX_PER_INCH: f64 = 20.0;

/// Paint-layer sentinel meaning "draw the tiled fabric texture here".
pub const FABRIC_MARKER: &str = "__fabric__";

/// The only persisted layout version this build reads and writes.
pub const LAYOUT_VERSION: u32 = 1;

/// Default filename for exported layouts.
pub const DEFAULT_EXPORT_FILENAME: &str = "quilt-layout.json";

/// Largest supported grid extent on either side, in cells (inches).
pub const MAX_GRID_CELLS: usize = 1000;

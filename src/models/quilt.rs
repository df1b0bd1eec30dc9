//! Quilt configuration: block grid, sashing, and frame settings.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_GRID_CELLS;

/// Default sashing color.
pub const DEFAULT_SASHING_COLOR: &str = "#bfbfbf";
/// Default sashing border color.
pub const DEFAULT_SASHING_BORDER_COLOR: &str = "#666666";
/// Default outer border color.
pub const DEFAULT_BORDER_COLOR: &str = "#8c8c8c";

/// Immutable snapshot of everything that shapes the quilt grid.
///
/// All lengths are in inches. One grid cell is one inch, so the grid extents
/// derived from this configuration (see [`GridDimensions`]) are whole numbers
/// whenever every length here is whole.
///
/// # Validation
///
/// - `rows`, `cols` >= 1
/// - every width >= 0 and finite
/// - no count or length above [`MAX_GRID_CELLS`]
///
/// The per-field limit keeps the arithmetic finite; whether the combined
/// extents fit is checked on [`GridDimensions`].
///
/// Values coming from user input are clamped by [`QuiltConfig::sanitized`]
/// (or the helpers in `services::sanitize`) before they reach the geometry
/// functions, which assume a valid configuration.
///
/// The serialized form uses camelCase keys because it is embedded verbatim
/// in the persisted layout document.
///
/// [`GridDimensions`]: crate::models::GridDimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltConfig {
    /// Number of block rows
    pub rows: u32,
    /// Number of block columns
    pub cols: u32,
    /// Finished block width (inches)
    pub block_width: f64,
    /// Finished block height (inches)
    pub block_height: f64,
    /// Whether sashing strips separate the blocks
    pub sashing_enabled: bool,
    /// Finished sashing width (inches), only used when sashing is enabled
    pub sashing_width: f64,
    /// Sashing fallback color
    pub sashing_color: String,
    /// Whether a sashing border frames the block field
    pub sashing_border_enabled: bool,
    /// Finished sashing border width (inches)
    pub sashing_border_width: f64,
    /// Sashing border fallback color
    pub sashing_border_color: String,
    /// Finished outer border width (inches)
    pub border_width: f64,
    /// Outer border fallback color
    pub border_color: String,
}

impl QuiltConfig {
    /// Returns the sashing width that actually contributes to the grid.
    #[must_use]
    pub fn effective_sashing_width(&self) -> f64 {
        if self.sashing_enabled {
            self.sashing_width
        } else {
            0.0
        }
    }

    /// Returns the sashing border width that actually contributes to the grid.
    #[must_use]
    pub fn effective_sashing_border_width(&self) -> f64 {
        if self.sashing_border_enabled {
            self.sashing_border_width
        } else {
            0.0
        }
    }

    /// Returns a copy with counts clamped to `1..=MAX_GRID_CELLS` and widths
    /// clamped to finite values in `0..=MAX_GRID_CELLS`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            rows: clamp_count(self.rows),
            cols: clamp_count(self.cols),
            block_width: clamp_length(self.block_width),
            block_height: clamp_length(self.block_height),
            sashing_width: clamp_length(self.sashing_width),
            sashing_border_width: clamp_length(self.sashing_border_width),
            border_width: clamp_length(self.border_width),
            ..self.clone()
        }
    }

    /// Checks whether the configuration already satisfies the geometry invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self == self.sanitized()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_count(value: u32) -> u32 {
    value.clamp(1, MAX_GRID_CELLS as u32)
}

#[allow(clippy::cast_precision_loss)]
fn clamp_length(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_GRID_CELLS as f64)
    } else {
        0.0
    }
}

impl Default for QuiltConfig {
    /// A 3x3 quilt of 15x18 in blocks with 2 in sashing, a 2 in sashing border
    /// and a 4 in outer border.
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            block_width: 15.0,
            block_height: 18.0,
            sashing_enabled: true,
            sashing_width: 2.0,
            sashing_color: DEFAULT_SASHING_COLOR.to_string(),
            sashing_border_enabled: true,
            sashing_border_width: 2.0,
            sashing_border_color: DEFAULT_SASHING_BORDER_COLOR.to_string(),
            border_width: 4.0,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
        }
    }
}

//! Grid extents derived from a [`QuiltConfig`].

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use serde::{Deserialize, Serialize};
use std::fmt;

use super::quilt::QuiltConfig;
use crate::constants::MAX_GRID_CELLS;

/// Geometry whose grid would exceed [`MAX_GRID_CELLS`] on a side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTooLarge {
    /// Requested finished width (inches)
    pub width_in: f64,
    /// Requested finished height (inches)
    pub height_in: f64,
}

impl fmt::Display for GridTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quilt would be {}\" x {}\"; the largest supported grid is {MAX_GRID_CELLS}\" x {MAX_GRID_CELLS}\"",
            self.width_in, self.height_in
        )
    }
}

impl std::error::Error for GridTooLarge {}

/// Derived grid extents, in inches.
///
/// One paint-layer cell covers one square inch, so the paint layer is
/// `cell_rows() x cell_cols()` cells. The frame widths stored here are the
/// *effective* ones: a disabled sashing or sashing border contributes zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDimensions {
    /// Width of the block + sashing field
    pub core_width_in: f64,
    /// Height of the block + sashing field
    pub core_height_in: f64,
    /// Width including both frames
    pub total_width_in: f64,
    /// Height including both frames
    pub total_height_in: f64,
    /// Effective sashing width
    pub sash_width: f64,
    /// Effective sashing border width
    pub sash_border_width: f64,
    /// Outer border width
    pub border_width: f64,
    /// First core row (inches from the top edge)
    pub core_top: f64,
    /// First core column (inches from the left edge)
    pub core_left: f64,
    /// One past the last core row
    pub core_bottom: f64,
    /// One past the last core column
    pub core_right: f64,
}

impl GridDimensions {
    /// Computes grid extents for a configuration.
    ///
    /// Total function: the configuration is assumed to be sanitized (counts
    /// >= 1, widths >= 0). Identical inputs always produce identical output,
    /// which is what lets the store compare extents to decide whether a
    /// rebuild is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use quilt_planner::models::{GridDimensions, QuiltConfig};
    ///
    /// let dims = GridDimensions::compute(&QuiltConfig::default());
    /// assert_eq!(dims.core_width_in, 49.0);
    /// assert_eq!(dims.total_height_in, 70.0);
    /// ```
    #[must_use]
    pub fn compute(cfg: &QuiltConfig) -> Self {
        let sash_w = cfg.effective_sashing_width();
        let sash_border_w = cfg.effective_sashing_border_width();
        let border_w = cfg.border_width;

        let cols = f64::from(cfg.cols);
        let rows = f64::from(cfg.rows);

        let core_width_in = cols * cfg.block_width
            + if sash_w > 0.0 {
                (cols - 1.0) * sash_w
            } else {
                0.0
            };
        let core_height_in = rows * cfg.block_height
            + if sash_w > 0.0 {
                (rows - 1.0) * sash_w
            } else {
                0.0
            };

        let frame = sash_border_w + border_w;
        let total_width_in = core_width_in + 2.0 * frame;
        let total_height_in = core_height_in + 2.0 * frame;

        Self {
            core_width_in,
            core_height_in,
            total_width_in,
            total_height_in,
            sash_width: sash_w,
            sash_border_width: sash_border_w,
            border_width: border_w,
            core_top: frame,
            core_left: frame,
            core_bottom: total_height_in - frame,
            core_right: total_width_in - frame,
        }
    }

    /// Number of paint-layer rows (one per inch, fractional extents round up).
    #[must_use]
    pub fn cell_rows(&self) -> usize {
        to_cells(self.total_height_in)
    }

    /// Number of paint-layer columns.
    #[must_use]
    pub fn cell_cols(&self) -> usize {
        to_cells(self.total_width_in)
    }

    /// Checks that the paint layer for these extents stays within
    /// [`MAX_GRID_CELLS`] on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`GridTooLarge`] with the requested size otherwise.
    pub fn ensure_fits(&self) -> Result<(), GridTooLarge> {
        if self.cell_rows() <= MAX_GRID_CELLS && self.cell_cols() <= MAX_GRID_CELLS {
            Ok(())
        } else {
            Err(GridTooLarge {
                width_in: self.total_width_in,
                height_in: self.total_height_in,
            })
        }
    }

    /// Returns true if `(row, col)` lies inside the core rectangle.
    #[must_use]
    pub fn in_core(&self, row: f64, col: f64) -> bool {
        row >= self.core_top
            && row < self.core_bottom
            && col >= self.core_left
            && col < self.core_right
    }
}

/// Convenience wrapper around [`GridDimensions::compute`].
#[must_use]
pub fn compute_dimensions(cfg: &QuiltConfig) -> GridDimensions {
    GridDimensions::compute(cfg)
}

/// Infinite extents saturate to `usize::MAX` so they fail [`GridDimensions::ensure_fits`].
fn to_cells(extent: f64) -> usize {
    if extent > 0.0 {
        extent.ceil() as usize
    } else {
        0
    }
}

//! Zoom/pan transform and screen-to-cell hit testing.
//!
//! Screen units are abstract pixels: at 100 % zoom one grid cell (one inch)
//! spans [`PX_PER_INCH`] units. Front ends map their own units onto this
//! (the TUI uses terminal columns, the web client uses CSS pixels).

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::constants::PX_PER_INCH;

/// Smallest zoom level in percent.
pub const MIN_ZOOM: u16 = 50;
/// Largest zoom level in percent.
pub const MAX_ZOOM: u16 = 200;
/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: u16 = 10;

/// Current zoom level and pan offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Zoom in percent, always within `MIN_ZOOM..=MAX_ZOOM`
    pub zoom_percent: u16,
    /// First visible grid row
    pub pan_row: i64,
    /// First visible grid column
    pub pan_col: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_percent: 100,
            pan_row: 0,
            pan_col: 0,
        }
    }
}

impl Viewport {
    /// Creates a viewport at the given zoom (clamped) with no pan.
    #[must_use]
    pub fn with_zoom(zoom_percent: u16) -> Self {
        Self {
            zoom_percent: clamp_zoom(zoom_percent),
            ..Self::default()
        }
    }

    /// Scale factor (1.0 at 100 %).
    #[must_use]
    pub fn scale(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom_percent: u16) {
        self.zoom_percent = clamp_zoom(zoom_percent);
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_add(ZOOM_STEP));
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_sub(ZOOM_STEP));
    }

    /// Shifts the pan offset, keeping it inside `[0, rows) x [0, cols)`.
    pub fn pan_by(&mut self, d_row: i64, d_col: i64, grid_rows: usize, grid_cols: usize) {
        self.pan_row = clamp_pan(self.pan_row.saturating_add(d_row), grid_rows);
        self.pan_col = clamp_pan(self.pan_col.saturating_add(d_col), grid_cols);
    }

    /// Maps a screen position (relative to the grid origin) to a cell.
    ///
    /// The result can be negative or past the grid edge; painting ignores
    /// such coordinates, so callers do not need to bounds-check.
    #[must_use]
    pub fn screen_to_cell(&self, x: f64, y: f64) -> (i64, i64) {
        let cell_px = PX_PER_INCH * self.scale();
        let row = (y / cell_px).floor() as i64 + self.pan_row;
        let col = (x / cell_px).floor() as i64 + self.pan_col;
        (row, col)
    }

    /// Number of whole cells visible in an area of `width x height` screen units.
    #[must_use]
    pub fn visible_cells(&self, width: f64, height: f64) -> (usize, usize) {
        let cell_px = PX_PER_INCH * self.scale();
        let rows = (height / cell_px).floor().max(0.0) as usize;
        let cols = (width / cell_px).floor().max(0.0) as usize;
        (rows, cols)
    }
}

/// Zoom that makes a grid fit the available area.
///
/// Returns `None` when the grid already fits at 100 %, otherwise the largest
/// whole percentage that fits, clamped to `MIN_ZOOM..=MAX_ZOOM`.
#[must_use]
pub fn fit_zoom(grid_cols: usize, grid_rows: usize, avail_w: f64, avail_h: f64) -> Option<u16> {
    let grid_w = grid_cols as f64 * PX_PER_INCH;
    let grid_h = grid_rows as f64 * PX_PER_INCH;
    if grid_w <= 0.0 || grid_h <= 0.0 {
        return None;
    }
    if grid_w <= avail_w && grid_h <= avail_h {
        return None;
    }
    let ratio = (avail_w / grid_w).min(avail_h / grid_h);
    let percent = (ratio * 100.0).floor();
    let clamped = percent.clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM));
    Some(clamped as u16)
}

/// Clamps a zoom percentage to the supported range.
#[must_use]
pub fn clamp_zoom(zoom_percent: u16) -> u16 {
    zoom_percent.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn clamp_pan(value: i64, extent: usize) -> i64 {
    let max = i64::try_from(extent.saturating_sub(1)).unwrap_or(i64::MAX);
    value.clamp(0, max)
}

/// A normalized paint gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStroke {
    /// Press and release on the same cell
    Cell {
        /// Grid row
        row: i64,
        /// Grid column
        col: i64,
    },
    /// Inclusive rectangle spanned by a drag
    Rect {
        /// Top row
        min_row: i64,
        /// Bottom row
        max_row: i64,
        /// Left column
        min_col: i64,
        /// Right column
        max_col: i64,
    },
}

/// Press/release pair of a mouse drag (or a keyboard selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection {
    /// Cell under the pointer when the drag started
    pub start: (i64, i64),
    /// Cell under the pointer now
    pub end: (i64, i64),
}

impl DragSelection {
    /// Starts a selection on one cell.
    #[must_use]
    pub const fn new(row: i64, col: i64) -> Self {
        Self {
            start: (row, col),
            end: (row, col),
        }
    }

    /// Moves the free corner.
    pub fn update(&mut self, row: i64, col: i64) {
        self.end = (row, col);
    }

    /// Returns `(min_row, max_row, min_col, max_col)`.
    #[must_use]
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        let (r0, c0) = self.start;
        let (r1, c1) = self.end;
        (r0.min(r1), r0.max(r1), c0.min(c1), c0.max(c1))
    }

    /// Returns true if `(row, col)` is inside the selection.
    #[must_use]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        let (min_row, max_row, min_col, max_col) = self.bounds();
        (min_row..=max_row).contains(&row) && (min_col..=max_col).contains(&col)
    }

    /// Single cell for a click, rectangle for a real drag.
    #[must_use]
    pub fn stroke(&self) -> PaintStroke {
        if self.start == self.end {
            let (row, col) = self.start;
            return PaintStroke::Cell { row, col };
        }
        let (min_row, max_row, min_col, max_col) = self.bounds();
        PaintStroke::Rect {
            min_row,
            max_row,
            min_col,
            max_col,
        }
    }
}

//! User paint overlay on top of the region colors.
//!
//! The layer is a dense `rows x cols` matrix of raw cell values, one per grid
//! inch. A raw value is the empty string (no paint, the region color shows
//! through), the [`FABRIC_MARKER`] sentinel, or a color string.
//!
//! Rebuilding the grid replaces the layer with a fresh empty one. Painted
//! cells are deliberately *not* carried across a rebuild: cell `(r, c)` means
//! something different once the extents change.

use serde::{Deserialize, Serialize};

use crate::constants::FABRIC_MARKER;

/// Typed view of a raw cell value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaintValue {
    /// No paint, fall back to the region color
    Empty,
    /// Flat color string (normally `#rrggbb`)
    Color(String),
    /// Tiled fabric texture
    Fabric,
}

impl PaintValue {
    /// Interprets a raw stored value.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "" => Self::Empty,
            FABRIC_MARKER => Self::Fabric,
            color => Self::Color(color.to_string()),
        }
    }

    /// Returns the raw string stored in the layer.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Color(color) => color,
            Self::Fabric => FABRIC_MARKER,
        }
    }

    /// Returns true for [`PaintValue::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Dense matrix of raw paint values.
///
/// Serializes as a bare array of rows, which is exactly the `paintLayer`
/// field of the persisted layout document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintLayer {
    cells: Vec<Vec<String>>,
}

impl PaintLayer {
    /// Creates an all-empty layer.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Wraps an existing matrix without checking that rows are equal length.
    ///
    /// Use [`PaintLayer::reconcile`] before trusting the shape.
    #[must_use]
    pub fn from_rows(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (length of the first row).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Read-only access to the raw rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Replaces the matrix with a new all-empty one of the given size.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        *self = Self::new(rows, cols);
    }

    /// Clears every cell without changing the shape.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                cell.clear();
            }
        }
    }

    /// Raw value at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Typed value at `(row, col)`; out-of-bounds cells read as empty.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> PaintValue {
        self.get(row, col).map_or(PaintValue::Empty, PaintValue::from_raw)
    }

    /// Sets one cell. Out-of-bounds coordinates are ignored.
    ///
    /// Returns true when a cell was written.
    pub fn paint_cell(&mut self, row: i64, col: i64, value: &str) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                value.clone_into(cell);
                true
            }
            None => false,
        }
    }

    /// Sets every cell in the inclusive rectangle, skipping cells outside
    /// the matrix.
    ///
    /// Returns the number of cells written.
    pub fn paint_rect(
        &mut self,
        min_row: i64,
        max_row: i64,
        min_col: i64,
        max_col: i64,
        value: &str,
    ) -> usize {
        let Some((r0, r1)) = clip(min_row, max_row, self.rows()) else {
            return 0;
        };
        let mut written = 0;
        for row in &mut self.cells[r0..=r1] {
            let Some((c0, c1)) = clip(min_col, max_col, row.len()) else {
                continue;
            };
            for cell in &mut row[c0..=c1] {
                value.clone_into(cell);
                written += 1;
            }
        }
        written
    }

    /// Truncates or pads (with empty cells) to exactly `rows x cols`,
    /// keeping every value that still fits.
    ///
    /// Returns true if the shape had to change.
    pub fn reconcile(&mut self, rows: usize, cols: usize) -> bool {
        let mut changed = self.cells.len() != rows;
        self.cells.resize_with(rows, Vec::new);
        for row in &mut self.cells {
            if row.len() != cols {
                changed = true;
                row.resize(cols, String::new());
            }
        }
        changed
    }

    /// Number of cells carrying any paint.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.iter_raw().filter(|v| !v.is_empty()).count()
    }

    /// Number of cells carrying the fabric marker.
    #[must_use]
    pub fn fabric_count(&self) -> usize {
        self.iter_raw().filter(|v| *v == FABRIC_MARKER).count()
    }

    fn iter_raw(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flatten().map(String::as_str)
    }
}

/// Intersects the inclusive range `[lo, hi]` with `[0, len)`.
fn clip(lo: i64, hi: i64, len: usize) -> Option<(usize, usize)> {
    if len == 0 || hi < 0 || lo > hi {
        return None;
    }
    let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
    if lo > last {
        return None;
    }
    let lo = usize::try_from(lo.max(0)).ok()?;
    let hi = usize::try_from(hi.min(last)).ok()?;
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let layer = PaintLayer::new(3, 4);
        assert_eq!(layer.rows(), 3);
        assert_eq!(layer.cols(), 4);
        assert_eq!(layer.painted_count(), 0);
        assert_eq!(layer.get(2, 3), Some(""));
        assert_eq!(layer.get(3, 0), None);
    }

    #[test]
    fn test_paint_cell_read_back() {
        let mut layer = PaintLayer::new(3, 3);
        assert!(layer.paint_cell(1, 2, "#ff0000"));
        assert_eq!(layer.get(1, 2), Some("#ff0000"));
        assert_eq!(layer.value(1, 2), PaintValue::Color("#ff0000".to_string()));
    }

    #[test]
    fn test_paint_cell_out_of_bounds_is_noop() {
        let mut layer = PaintLayer::new(2, 2);
        let before = layer.clone();
        assert!(!layer.paint_cell(-1, 0, "#ff0000"));
        assert!(!layer.paint_cell(0, 2, "#ff0000"));
        assert!(!layer.paint_cell(5, 5, "#ff0000"));
        assert_eq!(layer, before);
    }

    #[test]
    fn test_resize_discards_paint() {
        let mut layer = PaintLayer::new(2, 2);
        layer.paint_cell(0, 0, FABRIC_MARKER);
        layer.resize(4, 5);
        assert_eq!(layer.rows(), 4);
        assert_eq!(layer.cols(), 5);
        assert_eq!(layer.value(0, 0), PaintValue::Empty);
    }

    #[test]
    fn test_paint_rect_clips_and_is_idempotent() {
        let mut once = PaintLayer::new(4, 4);
        assert_eq!(once.paint_rect(-2, 1, 2, 9, "#00aa55"), 4);

        let mut twice = once.clone();
        twice.paint_rect(-2, 1, 2, 9, "#00aa55");
        assert_eq!(once, twice);

        assert_eq!(once.get(0, 2), Some("#00aa55"));
        assert_eq!(once.get(1, 3), Some("#00aa55"));
        assert_eq!(once.get(2, 2), Some(""));
        assert_eq!(once.get(0, 1), Some(""));
    }

    #[test]
    fn test_paint_rect_outside_grid() {
        let mut layer = PaintLayer::new(4, 4);
        assert_eq!(layer.paint_rect(10, 12, 0, 3, "#000000"), 0);
        assert_eq!(layer.paint_rect(0, 3, -5, -1, "#000000"), 0);
        assert_eq!(layer.paint_rect(3, 1, 0, 3, "#000000"), 0);
    }

    #[test]
    fn test_reconcile_truncates_and_pads() {
        let mut layer = PaintLayer::from_rows(vec![
            vec!["#111111".into(), "#222222".into(), "#333333".into()],
            vec!["#444444".into()],
        ]);
        assert!(layer.reconcile(3, 2));
        assert_eq!(layer.rows(), 3);
        assert!(layer.as_rows().iter().all(|r| r.len() == 2));
        assert_eq!(layer.get(0, 1), Some("#222222"));
        assert_eq!(layer.get(1, 0), Some("#444444"));
        assert_eq!(layer.get(1, 1), Some(""));
        assert_eq!(layer.get(2, 0), Some(""));

        assert!(!layer.reconcile(3, 2));
    }

    #[test]
    fn test_counts_and_clear() {
        let mut layer = PaintLayer::new(3, 3);
        layer.paint_cell(0, 0, FABRIC_MARKER);
        layer.paint_cell(1, 1, "#ff0000");
        assert_eq!(layer.painted_count(), 2);
        assert_eq!(layer.fabric_count(), 1);
        layer.clear();
        assert_eq!(layer.painted_count(), 0);
        assert_eq!(layer.rows(), 3);
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let mut layer = PaintLayer::new(1, 2);
        layer.paint_cell(0, 1, FABRIC_MARKER);
        let json = serde_json::to_string(&layer).unwrap();
        assert_eq!(json, r#"[["","__fabric__"]]"#);
    }
}

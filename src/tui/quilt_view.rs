//! Quilt grid widget.
//!
//! One grid cell (one inch) is drawn as a block of terminal characters whose
//! size follows the zoom level: two columns by one row at 100 %. Terminal
//! positions are converted to the abstract screen units of
//! [`Viewport`] before hit testing, so the TUI and the web client share the
//! same pan/zoom arithmetic.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::constants::PX_PER_INCH;
use crate::models::viewport::{MIN_ZOOM, ZOOM_STEP};
use crate::models::{fit_zoom, RgbColor, Viewport};
use crate::services::{resolve_cell, PaintInstruction};

use super::{AppState, Theme};

/// Terminal characters per grid cell at the given zoom: `(width, height)`.
#[must_use]
pub fn cell_size(zoom_percent: u16) -> (u16, u16) {
    let scale = f64::from(zoom_percent) / 100.0;
    let width = (2.0 * scale).round().max(1.0) as u16;
    let height = scale.round().max(1.0) as u16;
    (width, height)
}

/// Number of whole cells that fit inside `inner`: `(rows, cols)`.
#[must_use]
pub fn visible_span(inner: Rect, zoom_percent: u16) -> (usize, usize) {
    let (w, h) = cell_size(zoom_percent);
    ((inner.height / h) as usize, (inner.width / w) as usize)
}

/// Maps a terminal position to a grid cell.
///
/// Returns `None` outside `inner`. The cell itself may still be past the
/// grid edge; paint operations ignore those.
#[must_use]
pub fn hit_test(inner: Rect, viewport: &Viewport, column: u16, row: u16) -> Option<(i64, i64)> {
    if column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let (w, h) = cell_size(viewport.zoom_percent);
    let cell_px = PX_PER_INCH * viewport.scale();
    let x = f64::from(column - inner.x) / f64::from(w) * cell_px;
    let y = f64::from(row - inner.y) / f64::from(h) * cell_px;
    Some(viewport.screen_to_cell(x, y))
}

/// Zoom that fits the whole grid inside `inner`, or 100 when it already fits.
///
/// Cells snap to whole characters, so the proportional fit is stepped down
/// until the rounded cell size fits too (or the minimum zoom is reached).
#[must_use]
pub fn fit_zoom_for(inner: Rect, grid_rows: usize, grid_cols: usize) -> u16 {
    // At 100 % a cell is two characters wide and one tall.
    let avail_w = f64::from(inner.width) / 2.0 * PX_PER_INCH;
    let avail_h = f64::from(inner.height) * PX_PER_INCH;
    let mut zoom = fit_zoom(grid_cols, grid_rows, avail_w, avail_h).unwrap_or(100);
    let fits = |zoom| {
        let (rows, cols) = visible_span(inner, zoom);
        rows >= grid_rows && cols >= grid_cols
    };
    while zoom > MIN_ZOOM && !fits(zoom) {
        zoom = zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }
    zoom
}

/// Inner drawing area of the bordered grid block.
#[must_use]
pub fn grid_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Quilt grid widget
pub struct QuiltView;

impl QuiltView {
    /// Render the visible part of the quilt
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let store = &state.store;
        let viewport = store.viewport();
        let dims = store.dims();

        let title = format!(
            " {}\" x {}\" | {} x {} cells | {}% ",
            dims.total_width_in,
            dims.total_height_in,
            store.paint_layer().rows(),
            store.paint_layer().cols(),
            viewport.zoom_percent
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let (cell_w, cell_h) = cell_size(viewport.zoom_percent);
        let (span_rows, span_cols) = visible_span(inner, viewport.zoom_percent);
        let first_row = viewport.pan_row.max(0) as usize;
        let first_col = viewport.pan_col.max(0) as usize;
        let last_row = (first_row + span_rows).min(store.paint_layer().rows());
        let last_col = (first_col + span_cols).min(store.paint_layer().cols());

        let buf = f.buffer_mut();
        for row in first_row..last_row {
            for col in first_col..last_col {
                let (symbol, mut style) = cell_appearance(&resolve_cell(row, col, store), theme);
                let (r, c) = (row as i64, col as i64);
                if state.cursor == (row, col) {
                    style = style.add_modifier(Modifier::REVERSED);
                    if symbol == " " {
                        style = style.fg(theme.accent);
                    }
                }
                let selected = state.selection.is_some_and(|s| s.contains(r, c))
                    || state.mouse_drag.is_some_and(|s| s.contains(r, c));
                let symbol = if selected && symbol == " " { "·" } else { symbol };
                if selected {
                    style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
                }

                let x = inner.x + (col - first_col) as u16 * cell_w;
                let y = inner.y + (row - first_row) as u16 * cell_h;
                fill(buf, Rect::new(x, y, cell_w, cell_h), symbol, style);
            }
        }
    }
}

fn cell_appearance(paint: &PaintInstruction, theme: &Theme) -> (&'static str, Style) {
    match paint {
        PaintInstruction::Flat { color } => {
            let bg = RgbColor::from_hex(color).map_or(Color::Reset, |c| c.to_ratatui_color());
            (" ", Style::default().bg(bg).fg(theme.text))
        }
        PaintInstruction::Fabric {
            offset_col,
            offset_row,
            ..
        } => {
            let parity = (offset_col.floor() + offset_row.floor()) as i64 % 2 == 0;
            let symbol = if parity { "░" } else { "▒" };
            (symbol, Style::default().fg(theme.primary).bg(theme.surface))
        }
    }
}

fn fill(buf: &mut Buffer, area: Rect, symbol: &str, style: Style) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

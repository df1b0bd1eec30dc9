//! `paint` command: apply a paint stroke to a layout file in place.

use crate::cli::common::{load_layout, save_layout, CliError, CliResult};
use crate::constants::FABRIC_MARKER;
use crate::models::{DragSelection, PaintStroke, RgbColor};
use crate::store::QuiltStore;
use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// Paint a cell or rectangle of a layout file
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("paint_value").required(true).args(["color", "fabric", "clear"])))]
pub struct PaintArgs {
    /// Path to layout JSON file
    #[arg(value_name = "FILE")]
    pub layout: PathBuf,

    /// Grid row (0-based, one row per inch)
    #[arg(long, value_name = "ROW")]
    pub row: i64,

    /// Grid column (0-based, one column per inch)
    #[arg(long, value_name = "COL")]
    pub col: i64,

    /// Opposite corner row for a rectangle
    #[arg(long, value_name = "ROW", requires = "to_col")]
    pub to_row: Option<i64>,

    /// Opposite corner column for a rectangle
    #[arg(long, value_name = "COL", requires = "to_row")]
    pub to_col: Option<i64>,

    /// Paint a hex color (#rrggbb or #rgb)
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Paint with the fabric texture
    #[arg(long)]
    pub fabric: bool,

    /// Erase paint
    #[arg(long)]
    pub clear: bool,
}

impl PaintArgs {
    /// Execute the paint command
    pub fn execute(&self) -> CliResult<()> {
        let value = self.paint_value()?;
        let layout = load_layout(&self.layout)?;

        // Going through the store reconciles the paint layer with the quilt.
        let store = QuiltStore::from_layout(layout);
        let (rows, cols) = (store.paint_layer().rows(), store.paint_layer().cols());
        let mut layout = store.export_layout();

        let mut selection = DragSelection::new(self.row, self.col);
        if let (Some(to_row), Some(to_col)) = (self.to_row, self.to_col) {
            selection.update(to_row, to_col);
        }

        let changed = match selection.stroke() {
            PaintStroke::Cell { row, col } => {
                usize::from(layout.paint_layer.paint_cell(row, col, &value))
            }
            PaintStroke::Rect {
                min_row,
                max_row,
                min_col,
                max_col,
            } => layout
                .paint_layer
                .paint_rect(min_row, max_row, min_col, max_col, &value),
        };

        if changed == 0 {
            return Err(CliError::validation(format!(
                "Nothing to paint: the selection lies outside the {rows} x {cols} grid"
            )));
        }

        save_layout(&layout, &self.layout)?;
        let verb = if value.is_empty() { "Cleared" } else { "Painted" };
        println!("{verb} {changed} cell(s) in {}", self.layout.display());
        Ok(())
    }

    fn paint_value(&self) -> CliResult<String> {
        if self.clear {
            return Ok(String::new());
        }
        if self.fabric {
            return Ok(FABRIC_MARKER.to_string());
        }
        let hex = self.color.as_deref().unwrap_or_default();
        RgbColor::normalize(hex)
            .map_err(|e| CliError::validation(format!("Invalid color '{hex}': {e}")))
    }
}

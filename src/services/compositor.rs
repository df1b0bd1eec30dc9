//! Resolves what each grid cell should look like.
//!
//! A cell's paint value (if any) wins over its region color. Fabric-marked
//! cells become a tiled-texture instruction, but only once the texture has
//! loaded; before that they show the region color as if unpainted.

#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::models::{CellType, PaintValue};
use crate::store::QuiltStore;

/// How a renderer should fill one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaintInstruction {
    /// Solid color
    #[serde(rename_all = "camelCase")]
    Flat {
        /// Color string, normally `#rrggbb`
        color: String,
    },
    /// Tiled fabric texture
    #[serde(rename_all = "camelCase")]
    Fabric {
        /// Tile size in inches
        repeat_inches: f64,
        /// Horizontal position of this cell inside its tile (inches)
        offset_col: f64,
        /// Vertical position of this cell inside its tile (inches)
        offset_row: f64,
    },
}

/// A resolved cell with its coordinates and region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCell {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Region under the paint
    pub region: CellType,
    /// What to draw
    pub paint: PaintInstruction,
}

/// Resolves one cell of the current grid.
#[must_use]
pub fn resolve_cell(row: usize, col: usize, store: &QuiltStore) -> PaintInstruction {
    let cfg = store.config();
    let region = store.cell_type(row, col);
    match store.paint_layer().value(row, col) {
        PaintValue::Color(color) => PaintInstruction::Flat { color },
        PaintValue::Fabric if store.fabric().is_available() => {
            let repeat = store.fabric_repeat_inches();
            PaintInstruction::Fabric {
                repeat_inches: repeat,
                offset_col: (col as f64) % repeat,
                offset_row: (row as f64) % repeat,
            }
        }
        PaintValue::Fabric | PaintValue::Empty => PaintInstruction::Flat {
            color: region.region_color(cfg).to_string(),
        },
    }
}

/// Resolves every cell, row by row.
#[must_use]
pub fn resolve_grid(store: &QuiltStore) -> Vec<Vec<ResolvedCell>> {
    let layer = store.paint_layer();
    (0..layer.rows())
        .map(|row| {
            (0..layer.cols())
                .map(|col| ResolvedCell {
                    row,
                    col,
                    region: store.cell_type(row, col),
                    paint: resolve_cell(row, col, store),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FABRIC_MARKER;
    use crate::models::TextureInfo;
    use crate::store::StoreAction;

    fn flat(color: &str) -> PaintInstruction {
        PaintInstruction::Flat {
            color: color.to_string(),
        }
    }

    #[test]
    fn test_unpainted_cells_use_region_color() {
        let store = QuiltStore::default();
        assert_eq!(resolve_cell(0, 0, &store), flat("#8c8c8c"));
        assert_eq!(resolve_cell(4, 10, &store), flat("#666666"));
        assert_eq!(resolve_cell(24, 6, &store), flat("#bfbfbf"));
        assert_eq!(resolve_cell(6, 6, &store), flat("#ffffff"));
    }

    #[test]
    fn test_paint_overrides_region() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 0,
            col: 0,
            value: "#ff0000".into(),
        });
        assert_eq!(resolve_cell(0, 0, &store), flat("#ff0000"));
    }

    #[test]
    fn test_fabric_falls_back_until_loaded() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetFabricSource("plaid.png".into()));
        store.dispatch(StoreAction::PaintCell {
            row: 8,
            col: 14,
            value: FABRIC_MARKER.into(),
        });
        assert_eq!(resolve_cell(8, 14, &store), flat("#ffffff"));

        let ticket = store.fabric().pending().unwrap();
        assert!(store.complete_fabric(
            ticket,
            TextureInfo {
                handle: 7,
                width_px: 64,
                height_px: 64
            }
        ));
        assert_eq!(
            resolve_cell(8, 14, &store),
            PaintInstruction::Fabric {
                repeat_inches: 6.0,
                offset_col: 2.0,
                offset_row: 2.0,
            }
        );
    }

    #[test]
    fn test_resolve_grid_shape() {
        let store = QuiltStore::default();
        let grid = resolve_grid(&store);
        assert_eq!(grid.len(), 70);
        assert!(grid.iter().all(|row| row.len() == 61));
        assert_eq!(grid[0][0].region, CellType::Border);
        assert_eq!(grid[6][6].region, CellType::Block);
    }

    #[test]
    fn test_instruction_json_shape() {
        let json = serde_json::to_value(PaintInstruction::Fabric {
            repeat_inches: 6.0,
            offset_col: 1.0,
            offset_row: 0.0,
        })
        .unwrap();
        assert_eq!(json["kind"], "fabric");
        assert_eq!(json["repeatInches"], 6.0);
        assert_eq!(serde_json::to_value(flat("#000000")).unwrap()["kind"], "flat");
    }
}

//! Integration tests for the quilt store working with layout files.

use quilt_planner::constants::FABRIC_MARKER;
use quilt_planner::models::{CellType, TextureInfo};
use quilt_planner::parser::LayoutError;
use quilt_planner::services::{resolve_cell, LayoutService, PaintInstruction};
use quilt_planner::store::{QuiltStore, StoreAction};
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::{painted_layout, small_quilt, write_layout_file};

#[test]
fn test_small_quilt_regions() {
    let store = QuiltStore::new(small_quilt());
    assert_eq!(store.paint_layer().rows(), 15);
    assert_eq!(store.paint_layer().cols(), 15);

    assert_eq!(store.cell_type(0, 0), CellType::Border);
    assert_eq!(store.cell_type(2, 7), CellType::SashBorder);
    assert_eq!(store.cell_type(3, 3), CellType::Block);
    assert_eq!(store.cell_type(7, 4), CellType::Sashing);
    assert_eq!(store.cell_type(4, 7), CellType::Sashing);
    assert_eq!(store.cell_type(11, 11), CellType::Block);
    assert_eq!(store.cell_type(12, 12), CellType::SashBorder);
    assert_eq!(store.cell_type(14, 14), CellType::Border);
}

#[test]
fn test_saved_file_restores_paint() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quilt.json");

    let mut store = QuiltStore::new(small_quilt());
    store.dispatch(StoreAction::PaintRect {
        min_row: 3,
        max_row: 6,
        min_col: 3,
        max_col: 6,
        value: "#112233".to_string(),
    });
    store.dispatch(StoreAction::SetBorderColor("#000000".to_string()));
    LayoutService::save(&store.export_layout(), &path).unwrap();

    let mut restored = QuiltStore::default();
    restored.import_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(restored.config(), store.config());
    assert_eq!(restored.paint_layer(), store.paint_layer());
    assert_eq!(restored.paint_layer().painted_count(), 16);
    assert!(!restored.is_dirty());
}

#[test]
fn test_rejected_document_leaves_store_untouched() {
    let mut store = QuiltStore::new(small_quilt());
    store.dispatch(StoreAction::PaintCell {
        row: 5,
        col: 5,
        value: "#ff00ff".to_string(),
    });
    let before = store.export_layout();

    let future = r#"{"version": 2, "quilt": {}, "paintLayer": []}"#;
    assert!(matches!(
        store.import_str(future),
        Err(LayoutError::VersionMismatch { .. })
    ));
    assert!(matches!(
        store.import_str("not json"),
        Err(LayoutError::Parse(_))
    ));

    let after = store.export_layout();
    assert_eq!(after.quilt, before.quilt);
    assert_eq!(after.paint_layer, before.paint_layer);
}

#[test]
fn test_oversized_document_is_rejected_before_import() {
    let mut store = QuiltStore::new(small_quilt());
    store.dispatch(StoreAction::PaintCell {
        row: 5,
        col: 5,
        value: "#ff00ff".to_string(),
    });
    let before = store.export_layout();

    let mut document = serde_json::to_value(painted_layout()).unwrap();
    document["quilt"]["rows"] = serde_json::json!(4_000_000_000_u32);
    document["quilt"]["blockHeight"] = serde_json::json!(1e300);
    let err = store.import_str(&document.to_string()).unwrap_err();
    assert!(matches!(err, LayoutError::Parse(_)));

    let after = store.export_layout();
    assert_eq!(after.quilt, before.quilt);
    assert_eq!(after.paint_layer, before.paint_layer);
    assert_eq!(store.paint_layer().rows(), 15);
}

#[test]
fn test_load_from_file_reports_layout_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("old.json");
    fs::write(&path, r#"{"version": 0}"#).unwrap();

    let err = LayoutService::load(&path).unwrap_err();
    assert!(err.downcast_ref::<LayoutError>().is_some());
}

#[test]
fn test_import_clears_fabric_and_keeps_markers() {
    let dir = TempDir::new().unwrap();
    let path = write_layout_file(dir.path(), "painted.json", &painted_layout());

    let mut store = QuiltStore::default();
    store.dispatch(StoreAction::SetFabricSource("calico.png".to_string()));
    assert!(store.fabric_mode());

    let layout = LayoutService::load(&path).unwrap();
    store.dispatch(StoreAction::ImportLayout(Box::new(layout)));

    assert!(!store.fabric_mode());
    assert!(store.fabric().source().is_none());
    assert_eq!(store.paint_layer().get(8, 8), Some(FABRIC_MARKER));
    assert_eq!(store.fabric_repeat_inches(), 4.0);
    // No texture: fabric cells fall back to their region color
    assert_eq!(
        resolve_cell(8, 8, &store),
        PaintInstruction::Flat {
            color: "#ffffff".to_string()
        }
    );
}

#[test]
fn test_fabric_cells_tile_once_texture_arrives() {
    let mut store = QuiltStore::from_layout(painted_layout());
    store.dispatch(StoreAction::SetFabricSource("calico.png".to_string()));
    let ticket = store.fabric().pending().unwrap();
    let texture = TextureInfo {
        handle: 1,
        width_px: 64,
        height_px: 64,
    };
    assert!(store.complete_fabric(ticket, texture));

    assert_eq!(
        resolve_cell(8, 8, &store),
        PaintInstruction::Fabric {
            repeat_inches: 4.0,
            offset_col: 0.0,
            offset_row: 0.0,
        }
    );
    assert_eq!(
        resolve_cell(3, 3, &store),
        PaintInstruction::Flat {
            color: "#ff0000".to_string()
        }
    );
}

#[test]
fn test_geometry_change_rebuilds_only_when_extents_change() {
    let mut store = QuiltStore::from_layout(painted_layout());

    // Same extents: paint survives
    assert!(!store.dispatch(StoreAction::SetSashingColor("#010101".to_string())));
    assert_eq!(store.paint_layer().painted_count(), 2);

    // Wider border: grid grows and paint is discarded
    assert!(store.dispatch(StoreAction::SetBorderWidth(3.0)));
    assert_eq!(store.paint_layer().rows(), 17);
    assert_eq!(store.paint_layer().painted_count(), 0);
}

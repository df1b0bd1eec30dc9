//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use quilt_planner::constants::FABRIC_MARKER;
use quilt_planner::models::{PaintLayer, QuiltConfig};
use quilt_planner::parser::PersistedLayout;
use quilt_planner::services::LayoutService;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A 2x2 quilt of 4" blocks with 1" sashing, a 1" sashing border and a
/// 2" border: 15" x 15" finished, so a 15 x 15 cell grid.
///
/// Row/column layout (same both ways):
/// - 0..2   border
/// - 2      sashing border
/// - 3..7   block
/// - 7      sashing
/// - 8..12  block
/// - 12     sashing border
/// - 13..15 border
pub fn small_quilt() -> QuiltConfig {
    QuiltConfig {
        rows: 2,
        cols: 2,
        block_width: 4.0,
        block_height: 4.0,
        sashing_enabled: true,
        sashing_width: 1.0,
        sashing_color: "#bfbfbf".to_string(),
        sashing_border_enabled: true,
        sashing_border_width: 1.0,
        sashing_border_color: "#666666".to_string(),
        border_width: 2.0,
        border_color: "#8c8c8c".to_string(),
    }
}

/// Small quilt layout with one red cell at (3, 3) and one fabric cell at (8, 8).
pub fn painted_layout() -> PersistedLayout {
    let mut paint = PaintLayer::new(15, 15);
    paint.paint_cell(3, 3, "#ff0000");
    paint.paint_cell(8, 8, FABRIC_MARKER);
    PersistedLayout::new(small_quilt(), paint, 4.0)
}

/// Writes a layout document to `dir/name` and returns the path.
pub fn write_layout_file(dir: &Path, name: &str, layout: &PersistedLayout) -> PathBuf {
    let path = dir.join(name);
    LayoutService::save(layout, &path).expect("Failed to write layout fixture");
    path
}

/// Path to the quilt-planner binary
pub fn quilt_planner_bin() -> String {
    std::env::var("CARGO_BIN_EXE_quilt-planner")
        .unwrap_or_else(|_| "target/debug/quilt-planner".to_string())
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share configuration
/// between them.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(quilt_planner_bin());
    cmd.env("QUILT_PLANNER_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

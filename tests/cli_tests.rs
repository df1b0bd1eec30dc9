//! End-to-end tests for the headless `quilt-planner` commands.

use quilt_planner::services::LayoutService;
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// ============================================================================
// size
// ============================================================================

#[test]
fn test_size_default_quilt() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["size"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Core:  49\" x 58\""), "{stdout}");
    assert!(stdout.contains("Total: 61\" x 70\""), "{stdout}");
    assert!(stdout.contains("Grid:  70 rows x 61 columns"), "{stdout}");
}

#[test]
fn test_size_json_without_frames() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(
        &[
            "size",
            "--rows",
            "2",
            "--cols",
            "3",
            "--block-width",
            "10",
            "--block-height",
            "10",
            "--no-sashing",
            "--no-sashing-border",
            "--border-width",
            "0",
            "--json",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["totalWidthIn"], 30.0);
    assert_eq!(result["totalHeightIn"], 20.0);
    assert_eq!(result["cellRows"], 20);
    assert_eq!(result["cellCols"], 30);
}

#[test]
fn test_size_rejects_zero_block_width() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["size", "--block-width", "0"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--block-width"), "{stderr}");
}

#[test]
fn test_size_rejects_oversized_quilt() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["size", "--rows", "1000"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("largest supported grid"), "{stderr}");
}

// ============================================================================
// yardage
// ============================================================================

#[test]
fn test_yardage_default_report() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["yardage", "--strips"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quilt Size: 61\" x 70\""), "{stdout}");
    assert!(stdout.contains("Blocks:         1 3/4 yards"), "{stdout}");
    assert!(stdout.contains("Backing:        4 yards"), "{stdout}");
    assert!(stdout.contains("Total:          8 1/4 yards"), "{stdout}");
    assert!(stdout.contains("Binding Strips Needed: 7"), "{stdout}");
    assert!(stdout.contains("Total Inches: 41.5"), "{stdout}");
}

#[test]
fn test_yardage_json_uses_wof_flag() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["yardage", "--wof", "60", "--json"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["size"]["widthIn"], 61.0);
    // 61" is wider than a 60" bolt, so still two backing panels
    assert_eq!(result["fabric"]["backing"], 4.0);
    assert!(result.get("strips").is_none());
}

#[test]
fn test_yardage_rejects_zero_wof() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["yardage", "--wof", "0"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// new / inspect / paint / render
// ============================================================================

#[test]
fn test_new_writes_layout_document() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let target = work.path().join("baby-quilt");

    let output = isolated_command(
        &[
            "new",
            "-o",
            target.to_str().unwrap(),
            "--rows",
            "2",
            "--cols",
            "2",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let path = work.path().join("baby-quilt.json");
    let layout = LayoutService::load(&path).expect("new should write a valid layout");
    assert_eq!(layout.version, 1);
    assert_eq!(layout.quilt.rows, 2);
    assert_eq!(layout.paint_layer.painted_count(), 0);

    // A second run refuses to overwrite
    let again = isolated_command(
        &["new", "-o", path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(again.status.code(), Some(1));
}

#[test]
fn test_inspect_reports_counts() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = write_layout_file(work.path(), "quilt.json", &painted_layout());

    let output = isolated_command(
        &["inspect", path.to_str().unwrap(), "--json"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["gridRows"], 15);
    assert_eq!(result["gridCols"], 15);
    assert_eq!(result["paintedCells"], 2);
    assert_eq!(result["fabricCells"], 1);
    assert_eq!(result["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_inspect_warns_about_mismatched_paint_layer() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let mut layout = painted_layout();
    layout.quilt.border_width = 3.0;
    let path = write_layout_file(work.path(), "quilt.json", &layout);

    let output = isolated_command(&["inspect", path.to_str().unwrap()], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Warnings:"), "{stdout}");
    assert!(stdout.contains("15 x 15"), "{stdout}");
}

#[test]
fn test_inspect_rejects_future_version() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = work.path().join("future.json");
    fs::write(&path, r#"{"version": 2}"#).unwrap();

    let output = isolated_command(&["inspect", path.to_str().unwrap()], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown layout version"), "{stderr}");
}

#[test]
fn test_inspect_missing_file_is_io_error() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["inspect", "/nonexistent/quilt.json"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_paint_rectangle_in_place() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = write_layout_file(work.path(), "quilt.json", &painted_layout());
    let file = path.to_str().unwrap();

    let output = isolated_command(
        &[
            "paint", file, "--row", "6", "--col", "6", "--to-row", "3", "--to-col", "3",
            "--color", "#ABC",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Painted 16 cell(s)"), "{stdout}");

    let layout = LayoutService::load(&path).unwrap();
    assert_eq!(layout.paint_layer.get(3, 3), Some("#aabbcc"));
    assert_eq!(layout.paint_layer.get(6, 6), Some("#aabbcc"));
    assert_eq!(layout.paint_layer.painted_count(), 17);
}

#[test]
fn test_paint_clear_and_off_grid() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = write_layout_file(work.path(), "quilt.json", &painted_layout());
    let file = path.to_str().unwrap();

    let cleared = isolated_command(
        &["paint", file, "--row", "3", "--col", "3", "--clear"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(cleared.status.code(), Some(0));
    assert_eq!(
        LayoutService::load(&path).unwrap().paint_layer.get(3, 3),
        Some("")
    );

    let off_grid = isolated_command(
        &["paint", file, "--row", "40", "--col", "40", "--fabric"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(off_grid.status.code(), Some(1));
}

#[test]
fn test_paint_requires_a_value() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = write_layout_file(work.path(), "quilt.json", &painted_layout());

    let output = isolated_command(
        &["paint", path.to_str().unwrap(), "--row", "3", "--col", "3"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_render_plain_shows_regions() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let path = write_layout_file(work.path(), "quilt.json", &painted_layout());

    let output = isolated_command(
        &["render", path.to_str().unwrap(), "--plain"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[0], "BBBBBBBBBBBBBBB");
    assert_eq!(lines[2], "BBSSSSSSSSSSSBB");
    assert_eq!(lines[3], "BBS....X....SBB");
    assert_eq!(lines[7], "BBSXXXXXXXXXSBB");
}

//! `inspect` command: summary of a layout file.

use crate::cli::common::{load_layout, print_json, CliResult};
use crate::models::{GridDimensions, QuiltConfig};
use crate::store::QuiltStore;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Summarize a layout file
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to layout JSON file
    #[arg(value_name = "FILE")]
    pub layout: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InspectOutput {
    exported_at: String,
    quilt: QuiltConfig,
    dimensions: GridDimensions,
    grid_rows: usize,
    grid_cols: usize,
    painted_cells: usize,
    fabric_cells: usize,
    fabric_repeat_inches: f64,
    warnings: Vec<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;

        let mut warnings = Vec::new();
        let sanitized = layout.quilt.sanitized();
        if sanitized != layout.quilt {
            warnings
                .push("Quilt configuration had out-of-range values and was clamped".to_string());
        }
        let expected = GridDimensions::compute(&sanitized);
        let declared = (layout.paint_layer.rows(), layout.paint_layer.cols());
        if declared != (expected.cell_rows(), expected.cell_cols()) {
            warnings.push(format!(
                "Paint layer is {} x {} but the quilt needs {} x {}; it will be resized on load",
                declared.0,
                declared.1,
                expected.cell_rows(),
                expected.cell_cols()
            ));
        }
        if !(layout.fabric_repeat_inches.is_finite() && layout.fabric_repeat_inches > 0.0) {
            warnings.push(format!(
                "Fabric repeat {} is not positive and will be ignored",
                layout.fabric_repeat_inches
            ));
        }

        let exported_at = layout.exported_at.clone();
        let store = QuiltStore::from_layout(layout);
        let dims = *store.dims();
        let output = InspectOutput {
            exported_at,
            quilt: store.config().clone(),
            dimensions: dims,
            grid_rows: dims.cell_rows(),
            grid_cols: dims.cell_cols(),
            painted_cells: store.paint_layer().painted_count(),
            fabric_cells: store.paint_layer().fabric_count(),
            fabric_repeat_inches: store.fabric_repeat_inches(),
            warnings,
        };

        if self.json {
            return print_json(&output);
        }

        let q = &output.quilt;
        println!("Layout: {}", self.layout.display());
        println!("Exported: {}", output.exported_at);
        println!();
        println!(
            "Blocks:         {} x {} of {}\" x {}\"",
            q.rows, q.cols, q.block_width, q.block_height
        );
        println!(
            "Sashing:        {}",
            frame_label(q.sashing_enabled, q.sashing_width, &q.sashing_color)
        );
        println!(
            "Sashing Border: {}",
            frame_label(q.sashing_border_enabled, q.sashing_border_width, &q.sashing_border_color)
        );
        println!("Border:         {}", frame_label(true, q.border_width, &q.border_color));
        println!();
        println!("Finished size:  {}\" x {}\"", dims.total_width_in, dims.total_height_in);
        println!("Grid:           {} rows x {} columns", output.grid_rows, output.grid_cols);
        println!("Painted cells:  {}", output.painted_cells);
        println!(
            "Fabric cells:   {} (repeat {}\")",
            output.fabric_cells, output.fabric_repeat_inches
        );

        if !output.warnings.is_empty() {
            println!();
            println!("Warnings:");
            for warning in &output.warnings {
                println!("  ⚠ {warning}");
            }
        }
        Ok(())
    }
}

fn frame_label(enabled: bool, width: f64, color: &str) -> String {
    if enabled && width > 0.0 {
        format!("{width}\" {color}")
    } else {
        "none".to_string()
    }
}

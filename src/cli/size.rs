//! `size` command: finished dimensions for a geometry.

use crate::cli::common::{print_json, CliResult};
use crate::cli::geometry::GeometryArgs;
use crate::models::GridDimensions;
use clap::Args;
use serde::Serialize;

/// Print the core and finished size of a quilt
#[derive(Debug, Clone, Args)]
pub struct SizeArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SizeOutput {
    #[serde(flatten)]
    dimensions: GridDimensions,
    cell_rows: usize,
    cell_cols: usize,
}

impl SizeArgs {
    /// Execute the size command
    pub fn execute(&self) -> CliResult<()> {
        let cfg = self.geometry.to_config()?;
        let dims = GridDimensions::compute(&cfg);

        if self.json {
            return print_json(&SizeOutput {
                dimensions: dims,
                cell_rows: dims.cell_rows(),
                cell_cols: dims.cell_cols(),
            });
        }

        println!(
            "Core:  {}\" x {}\"",
            dims.core_width_in, dims.core_height_in
        );
        println!(
            "Total: {}\" x {}\"",
            dims.total_width_in, dims.total_height_in
        );
        println!(
            "Grid:  {} rows x {} columns",
            dims.cell_rows(),
            dims.cell_cols()
        );
        Ok(())
    }
}

//! `render` command: print the composited grid to the terminal.

use crate::cli::common::{load_layout, CliResult};
use crate::models::RgbColor;
use crate::services::{resolve_grid, PaintInstruction};
use crate::store::QuiltStore;
use clap::Args;
use crossterm::style::{Color, Stylize};
use std::path::PathBuf;

/// Print a layout as colored blocks
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to layout JSON file
    #[arg(value_name = "FILE")]
    pub layout: PathBuf,

    /// Print region letters (B border, S sashing border, X sashing, . block)
    #[arg(long)]
    pub plain: bool,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let store = QuiltStore::from_layout(load_layout(&self.layout)?);

        for row in resolve_grid(&store) {
            let line: String = row
                .iter()
                .map(|cell| {
                    if self.plain {
                        return cell.region.letter().to_string();
                    }
                    // No texture is loaded outside the editor, so fabric
                    // cells never reach this arm; keep a neutral swatch.
                    let hex = match &cell.paint {
                        PaintInstruction::Flat { color } => color.as_str(),
                        PaintInstruction::Fabric { .. } => "#c8b89a",
                    };
                    let rgb = RgbColor::from_hex(hex).unwrap_or_default();
                    "██"
                        .with(Color::Rgb {
                            r: rgb.r,
                            g: rgb.g,
                            b: rgb.b,
                        })
                        .to_string()
                })
                .collect();
            println!("{line}");
        }
        Ok(())
    }
}

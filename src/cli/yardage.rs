//! `yardage` command: fabric and strip estimates.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::geometry::GeometryArgs;
use crate::config::Config;
use crate::services::yardage::{calculate_fabric, calculate_strips, QuiltSize};
use crate::services::{FabricBreakdown, StripBreakdown};
use clap::Args;
use serde::Serialize;

/// Estimate fabric yardage for a quilt
#[derive(Debug, Clone, Args)]
pub struct YardageArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Width of fabric in inches (default from config)
    #[arg(long, value_name = "IN")]
    pub wof: Option<f64>,

    /// Seam allowance in inches (default from config)
    #[arg(long, value_name = "IN")]
    pub seam: Option<f64>,

    /// Also report width-of-fabric strip counts
    #[arg(long)]
    pub strips: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct YardageOutput {
    size: QuiltSize,
    fabric: FabricBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    strips: Option<StripBreakdown>,
}

impl YardageArgs {
    /// Execute the yardage command
    pub fn execute(&self) -> CliResult<()> {
        let cfg = self.geometry.to_config()?;

        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;
        let mut inputs = config.calculator.inputs();
        if let Some(wof) = self.wof {
            if !(wof.is_finite() && wof > 0.0) {
                return Err(CliError::validation(format!(
                    "--wof must be a positive number of inches, got {wof}"
                )));
            }
            inputs.wof = wof;
        }
        if let Some(seam) = self.seam {
            if !(seam.is_finite() && seam >= 0.0) {
                return Err(CliError::validation(format!(
                    "--seam must not be negative, got {seam}"
                )));
            }
            inputs.seam = seam;
        }

        let output = YardageOutput {
            size: QuiltSize::of(&cfg),
            fabric: calculate_fabric(&cfg, &inputs),
            strips: self.strips.then(|| calculate_strips(&cfg, &inputs)),
        };

        if self.json {
            return print_json(&output);
        }

        println!("Quilt Size: {}", output.size);
        println!();
        println!("{}", output.fabric);
        if let Some(strips) = &output.strips {
            println!();
            println!("{strips}");
        }
        Ok(())
    }
}

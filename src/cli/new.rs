//! `new` command: write an empty layout document.

use crate::cli::common::{save_layout, CliError, CliResult};
use crate::cli::geometry::GeometryArgs;
use crate::config::Config;
use crate::services::LayoutService;
use crate::store::QuiltStore;
use clap::Args;
use std::path::PathBuf;

/// Create a new, unpainted layout file
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Output file (default: quilt-layout.json in the configured layouts directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        let cfg = self.geometry.to_config()?;

        let path = match &self.output {
            Some(path) => LayoutService::with_json_extension(path),
            None => {
                let config = Config::load().map_err(|e| {
                    CliError::validation(format!("Failed to load configuration: {e}"))
                })?;
                LayoutService::default_export_path(&config)
            }
        };

        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let store = QuiltStore::new(cfg);
        save_layout(&store.export_layout(), &path)?;

        let dims = store.dims();
        println!(
            "Created {} ({} x {} cells)",
            path.display(),
            dims.cell_rows(),
            dims.cell_cols()
        );
        Ok(())
    }
}

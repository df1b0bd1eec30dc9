//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::models::RgbColor;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Width of fabric in inches
    #[arg(long, value_name = "IN")]
    wof: Option<f64>,

    /// Seam allowance in inches
    #[arg(long, value_name = "IN")]
    seam: Option<f64>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Starting paint color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    active_color: Option<String>,

    /// Directory for exported layouts
    #[arg(long, value_name = "DIR")]
    layouts_dir: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    #[serde(flatten)]
    config: &'a Config,
    config_file: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            let config_file = Config::config_file_path()
                .ok()
                .map(|p| p.to_string_lossy().to_string());
            print_json(&ConfigOutput {
                config: &config,
                config_file,
            })
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.wof.is_none()
            && self.seam.is_none()
            && self.theme.is_none()
            && self.active_color.is_none()
            && self.layouts_dir.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --wof, --seam, --theme, --active-color, or --layouts-dir",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(wof) = self.wof {
            config.calculator.wof = wof;
        }
        if let Some(seam) = self.seam {
            config.calculator.seam = seam;
        }

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = ThemeMode::parse(theme_str).ok_or_else(|| {
                CliError::validation("Invalid theme mode. Must be 'auto', 'light', or 'dark'")
            })?;
        }

        if let Some(hex) = &self.active_color {
            config.paint.active_color = RgbColor::normalize(hex)
                .map_err(|e| CliError::validation(format!("Invalid active color: {e}")))?;
        }

        if let Some(dir) = &self.layouts_dir {
            std::fs::create_dir_all(dir).map_err(|e| {
                CliError::io(format!(
                    "Failed to create layouts directory {}: {e}",
                    dir.display()
                ))
            })?;
            config.paths.layouts_dir = Some(dir.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Quilt Planner Configuration");
    println!("===========================");
    println!();

    println!("Calculator:");
    println!("  Width of Fabric:     {}\"", config.calculator.wof);
    println!("  Seam Allowance:      {}\"", config.calculator.seam);
    println!("  Sashing Strip Width: {}\"", config.calculator.sash_strip_width);
    println!("  Binding Strip Width: {}\"", config.calculator.binding_strip_width);
    println!();

    println!("Paint:");
    println!("  Active Color:  {}", config.paint.active_color);
    println!("  Fabric Repeat: {}\"", config.paint.fabric_repeat_inches);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    println!("  Zoom:       {}%", config.ui.zoom_percent);
    println!();

    println!("Paths:");
    match &config.paths.layouts_dir {
        Some(dir) => println!("  Layouts Directory: {}", dir.display()),
        None => println!("  Layouts Directory: (current directory)"),
    }
}

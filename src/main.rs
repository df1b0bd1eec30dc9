//! Quilt Planner - terminal quilt layout designer
//!
//! Running without a subcommand opens the interactive editor; subcommands
//! give scriptable access to the calculators and layout files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quilt_planner::cli::{
    ConfigArgs, ExitCode, InspectArgs, NewArgs, PaintArgs, RenderArgs, SizeArgs, YardageArgs,
};
use quilt_planner::logging::{init_logging, LogTarget};

/// Quilt Planner - design quilt layouts and estimate fabric
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Layout file to open in the editor
    #[arg(value_name = "FILE")]
    layout_path: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print core and finished dimensions
    Size(SizeArgs),
    /// Estimate fabric yardage
    Yardage(YardageArgs),
    /// Create an empty layout file
    New(NewArgs),
    /// Summarize a layout file
    Inspect(InspectArgs),
    /// Paint cells of a layout file
    Paint(PaintArgs),
    /// Print a layout as colored blocks
    Render(RenderArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_editor(cli.layout_path, cli.verbose);
        return;
    };

    if let Err(e) = init_logging(&LogTarget::Stderr, cli.verbose) {
        eprintln!("Warning: {e:#}");
    }

    let result = match command {
        Commands::Size(args) => args.execute(),
        Commands::Yardage(args) => args.execute(),
        Commands::New(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::Paint(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
    }
}

#[cfg(feature = "ratatui")]
fn run_editor(layout_path: Option<PathBuf>, verbose: bool) {
    if let Err(e) = quilt_planner::tui::launch(layout_path, verbose) {
        eprintln!("Error: {e:#}");
        std::process::exit(ExitCode::IoError.code());
    }
}

#[cfg(not(feature = "ratatui"))]
fn run_editor(_layout_path: Option<PathBuf>, _verbose: bool) {
    eprintln!("This build has no terminal editor; run with --help for the available commands.");
    std::process::exit(ExitCode::ValidationError.code());
}

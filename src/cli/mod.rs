//! CLI command handlers for Quilt Planner.
//!
//! This module provides headless, scriptable access to the quilt geometry,
//! yardage calculators and layout files for automation and testing.

pub mod common;
pub mod config;
pub mod geometry;
pub mod inspect;
pub mod new;
pub mod paint;
pub mod render;
pub mod size;
pub mod yardage;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use geometry::GeometryArgs;
pub use inspect::InspectArgs;
pub use new::NewArgs;
pub use paint::PaintArgs;
pub use render::RenderArgs;
pub use size::SizeArgs;
pub use yardage::YardageArgs;

//! Service layer for business logic.
//!
//! This module contains services that encapsulate calculations and file
//! operations and coordinate between the models and the front ends.

pub mod compositor;
pub mod layouts;
pub mod sanitize;
pub mod yardage;

// Re-export commonly used types and functions
pub use compositor::{resolve_cell, resolve_grid, PaintInstruction, ResolvedCell};
pub use layouts::LayoutService;
pub use yardage::{
    calculate_fabric, calculate_strips, round_to_fourth, to_mixed_fraction, CalculatorInputs,
    FabricBreakdown, QuiltSize, StripBreakdown,
};

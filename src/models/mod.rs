//! Data models for quilt geometry, paint, and view state.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod cell;
pub mod dimensions;
pub mod fabric;
pub mod paint_layer;
pub mod palette;
pub mod quilt;
pub mod rgb;
pub mod viewport;

// Re-export all model types
pub use cell::{classify, CellType, BLOCK_COLOR};
pub use dimensions::{compute_dimensions, GridDimensions, GridTooLarge};
pub use fabric::{FabricState, FabricTicket, TextureInfo};
pub use paint_layer::{PaintLayer, PaintValue};
pub use palette::{SavedColors, PRESET_COLORS, SAVED_SLOTS};
pub use quilt::QuiltConfig;
pub use rgb::RgbColor;
pub use viewport::{fit_zoom, DragSelection, PaintStroke, Viewport};

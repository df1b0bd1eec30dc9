//! Application state store.
//!
//! [`QuiltStore`] owns the quilt configuration, the derived grid extents, the
//! paint layer, and the UI-adjacent state (active color, saved colors, fabric,
//! zoom). Every mutation goes through [`QuiltStore::dispatch`] with a named
//! [`StoreAction`], so the TUI, the CLI and the web API all change state the
//! same way.
//!
//! The paint layer always matches the current extents. Whenever a change
//! alters the extents the grid is rebuilt and prior paint is discarded; that
//! is intentional, since cell `(r, c)` no longer refers to the same spot.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::FABRIC_MARKER;
use crate::models::viewport::PaintStroke;
use crate::models::{
    CellType, FabricState, FabricTicket, GridDimensions, GridTooLarge, PaintLayer, QuiltConfig,
    SavedColors, TextureInfo, Viewport,
};
use crate::parser::{self, LayoutError, PersistedLayout};
use crate::services::yardage::{
    self, CalculatorInputs, FabricBreakdown, QuiltSize, StripBreakdown,
};

/// Named state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Number of block rows (clamped to >= 1)
    SetRows(u32),
    /// Number of block columns (clamped to >= 1)
    SetCols(u32),
    /// Block width in inches
    SetBlockWidth(f64),
    /// Block height in inches
    SetBlockHeight(f64),
    /// Sashing width in inches
    SetSashingWidth(f64),
    /// Sashing border width in inches
    SetSashingBorderWidth(f64),
    /// Outer border width in inches
    SetBorderWidth(f64),
    /// Turns sashing on or off
    ToggleSashing,
    /// Turns the sashing border on or off
    ToggleSashingBorder,
    /// Sashing fallback color
    SetSashingColor(String),
    /// Sashing border fallback color
    SetSashingBorderColor(String),
    /// Outer border fallback color
    SetBorderColor(String),
    /// Replaces the whole configuration in one step
    SetConfig(QuiltConfig),
    /// Rebuilds the grid from the current configuration, discarding paint
    BuildGrid,
    /// Paints one cell; off-grid coordinates are ignored
    PaintCell {
        /// Grid row
        row: i64,
        /// Grid column
        col: i64,
        /// Raw paint value
        value: String,
    },
    /// Paints an inclusive rectangle, clipped to the grid
    PaintRect {
        /// Top row
        min_row: i64,
        /// Bottom row
        max_row: i64,
        /// Left column
        min_col: i64,
        /// Right column
        max_col: i64,
        /// Raw paint value
        value: String,
    },
    /// Clears all paint without rebuilding
    ClearPaint,
    /// Color used by subsequent paint strokes
    SetActiveColor(String),
    /// Stores the active color in a saved slot
    SaveColor(usize),
    /// Makes a saved slot's color active (no-op when empty)
    LoadColor(usize),
    /// Empties a saved slot
    ClearSavedColor(usize),
    /// Starts loading a fabric image and switches fabric mode on
    SetFabricSource(String),
    /// Fabric tile size in inches (ignored unless positive)
    SetFabricRepeat(f64),
    /// Switches between painting color and painting fabric
    ToggleFabricMode,
    /// Forgets the fabric image and switches fabric mode off
    ClearFabric,
    /// Flips the dark-mode flag
    ToggleDarkMode,
    /// Zoom in percent (clamped to 50-200)
    SetZoom(u16),
    /// Moves the visible window by whole cells
    Pan {
        /// Rows to move (positive is down)
        d_row: i64,
        /// Columns to move (positive is right)
        d_col: i64,
    },
    /// Width of fabric for the calculators
    SetWof(f64),
    /// Seam allowance for the calculators
    SetSeam(f64),
    /// Sashing strip cut width
    SetSashStripWidth(f64),
    /// Binding strip cut width
    SetBindingStripWidth(f64),
    /// Replaces configuration and paint with a persisted layout
    ImportLayout(Box<PersistedLayout>),
}

impl StoreAction {
    /// Converts a normalized paint gesture into a paint action.
    #[must_use]
    pub fn from_stroke(stroke: PaintStroke, value: String) -> Self {
        match stroke {
            PaintStroke::Cell { row, col } => Self::PaintCell { row, col, value },
            PaintStroke::Rect {
                min_row,
                max_row,
                min_col,
                max_col,
            } => Self::PaintRect {
                min_row,
                max_row,
                min_col,
                max_col,
                value,
            },
        }
    }
}

/// Single owner of the designer state.
#[derive(Debug, Clone)]
pub struct QuiltStore {
    config: QuiltConfig,
    dims: GridDimensions,
    paint: PaintLayer,
    active_color: String,
    saved_colors: SavedColors,
    fabric: FabricState,
    fabric_repeat_inches: f64,
    fabric_mode: bool,
    dark_mode: bool,
    viewport: Viewport,
    calculator: CalculatorInputs,
    dirty: bool,
}

impl Default for QuiltStore {
    fn default() -> Self {
        Self::new(QuiltConfig::default())
    }
}

impl QuiltStore {
    /// Creates a store with a freshly built grid for `config`.
    ///
    /// A configuration whose grid would be too large is replaced by the
    /// default one.
    #[must_use]
    pub fn new(config: QuiltConfig) -> Self {
        let mut config = config.sanitized();
        let mut dims = GridDimensions::compute(&config);
        if let Err(err) = dims.ensure_fits() {
            warn!(error = %err, "Configuration too large, using defaults");
            config = QuiltConfig::default();
            dims = GridDimensions::compute(&config);
        }
        let paint = PaintLayer::new(dims.cell_rows(), dims.cell_cols());
        Self {
            config,
            dims,
            paint,
            active_color: "#ffcc00".to_string(),
            saved_colors: SavedColors::new(),
            fabric: FabricState::new(),
            fabric_repeat_inches: 6.0,
            fabric_mode: false,
            dark_mode: false,
            viewport: Viewport::default(),
            calculator: CalculatorInputs::default(),
            dirty: false,
        }
    }

    /// Creates a default quilt seeded with the user's configured defaults.
    #[must_use]
    pub fn with_config(app_config: &Config) -> Self {
        let mut store = Self::default();
        store.calculator = app_config.calculator.inputs();
        store.active_color.clone_from(&app_config.paint.active_color);
        if app_config.paint.fabric_repeat_inches > 0.0 {
            store.fabric_repeat_inches = app_config.paint.fabric_repeat_inches;
        }
        store.viewport = Viewport::with_zoom(app_config.ui.zoom_percent);
        store
    }

    /// Restores a store from a persisted layout.
    #[must_use]
    pub fn from_layout(layout: PersistedLayout) -> Self {
        let mut store = Self::default();
        store.dispatch(StoreAction::ImportLayout(Box::new(layout)));
        store
    }

    /// Applies an action.
    ///
    /// Returns true if the grid was rebuilt (paint discarded, extents
    /// possibly changed). Configuration edits that would push the grid past
    /// [`MAX_GRID_CELLS`](crate::constants::MAX_GRID_CELLS) are dropped without touching any state.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::SetRows(_)
            | StoreAction::SetCols(_)
            | StoreAction::SetBlockWidth(_)
            | StoreAction::SetBlockHeight(_)
            | StoreAction::SetSashingWidth(_)
            | StoreAction::SetSashingBorderWidth(_)
            | StoreAction::SetBorderWidth(_)
            | StoreAction::ToggleSashing
            | StoreAction::ToggleSashingBorder
            | StoreAction::SetSashingColor(_)
            | StoreAction::SetSashingBorderColor(_)
            | StoreAction::SetBorderColor(_)
            | StoreAction::SetConfig(_) => {
                let mut candidate = self.config.clone();
                edit_config(&mut candidate, action);
                self.update_geometry(candidate)
            }
            StoreAction::BuildGrid => {
                self.rebuild();
                true
            }
            StoreAction::PaintCell { row, col, value } => {
                if self.paint.paint_cell(row, col, &value) {
                    self.dirty = true;
                }
                false
            }
            StoreAction::PaintRect {
                min_row,
                max_row,
                min_col,
                max_col,
                value,
            } => {
                if self.paint.paint_rect(min_row, max_row, min_col, max_col, &value) > 0 {
                    self.dirty = true;
                }
                false
            }
            StoreAction::ClearPaint => {
                self.paint.clear();
                self.dirty = true;
                false
            }
            StoreAction::SetActiveColor(color) => {
                self.active_color = color;
                false
            }
            StoreAction::SaveColor(slot) => {
                self.saved_colors.save(slot, &self.active_color);
                false
            }
            StoreAction::LoadColor(slot) => {
                if let Some(color) = self.saved_colors.get(slot) {
                    self.active_color = color.to_string();
                }
                false
            }
            StoreAction::ClearSavedColor(slot) => {
                self.saved_colors.clear(slot);
                false
            }
            StoreAction::SetFabricSource(source) => {
                self.fabric.request(source);
                self.fabric_mode = true;
                false
            }
            StoreAction::SetFabricRepeat(inches) => {
                if inches.is_finite() && inches > 0.0 {
                    self.fabric_repeat_inches = inches;
                    self.dirty = true;
                }
                false
            }
            StoreAction::ToggleFabricMode => {
                self.fabric_mode = !self.fabric_mode;
                false
            }
            StoreAction::ClearFabric => {
                self.fabric.clear();
                self.fabric_mode = false;
                false
            }
            StoreAction::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                false
            }
            StoreAction::SetZoom(zoom) => {
                self.viewport.set_zoom(zoom);
                false
            }
            StoreAction::Pan { d_row, d_col } => {
                self.viewport
                    .pan_by(d_row, d_col, self.paint.rows(), self.paint.cols());
                false
            }
            StoreAction::SetWof(v) => {
                self.calculator.wof = v;
                false
            }
            StoreAction::SetSeam(v) => {
                self.calculator.seam = v;
                false
            }
            StoreAction::SetSashStripWidth(v) => {
                self.calculator.sash_strip_width = v;
                false
            }
            StoreAction::SetBindingStripWidth(v) => {
                self.calculator.binding_strip_width = v;
                false
            }
            StoreAction::ImportLayout(layout) => self.apply_layout(*layout),
        }
    }

    /// Parses a layout document and applies it.
    ///
    /// # Errors
    ///
    /// Returns the parse or version error; the store is left untouched.
    pub fn import_str(&mut self, input: &str) -> Result<(), LayoutError> {
        match parser::deserialize(input) {
            Ok(layout) => {
                self.dispatch(StoreAction::ImportLayout(Box::new(layout)));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Layout import rejected");
                Err(err)
            }
        }
    }

    /// Snapshot of the persistable state.
    #[must_use]
    pub fn export_layout(&self) -> PersistedLayout {
        PersistedLayout::new(
            self.config.clone(),
            self.paint.clone(),
            self.fabric_repeat_inches,
        )
    }

    /// Records that a fabric image finished loading.
    ///
    /// Stale tickets (from a replaced or cleared source) are ignored.
    pub fn complete_fabric(&mut self, ticket: FabricTicket, texture: TextureInfo) -> bool {
        self.fabric.complete(ticket, texture)
    }

    /// Clears the unsaved-changes flag.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Checks whether a configuration action would leave the grid within
    /// [`MAX_GRID_CELLS`](crate::constants::MAX_GRID_CELLS), without applying it.
    ///
    /// Actions that do not touch the configuration always pass.
    ///
    /// # Errors
    ///
    /// Returns the size the grid would have grown to.
    pub fn check_geometry(&self, action: &StoreAction) -> Result<(), GridTooLarge> {
        let mut candidate = self.config.clone();
        if !edit_config(&mut candidate, action.clone()) {
            return Ok(());
        }
        GridDimensions::compute(&candidate.sanitized()).ensure_fits()
    }

    fn update_geometry(&mut self, candidate: QuiltConfig) -> bool {
        let candidate = candidate.sanitized();
        if candidate == self.config {
            return false;
        }
        let dims = GridDimensions::compute(&candidate);
        if let Err(err) = dims.ensure_fits() {
            warn!(error = %err, "Configuration change rejected");
            return false;
        }
        self.config = candidate;
        self.dirty = true;
        if dims == self.dims {
            return false;
        }
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.dims = GridDimensions::compute(&self.config);
        let (rows, cols) = (self.dims.cell_rows(), self.dims.cell_cols());
        self.paint.resize(rows, cols);
        self.viewport.pan_by(0, 0, rows, cols);
        debug!(rows, cols, "Grid rebuilt");
    }

    fn apply_layout(&mut self, layout: PersistedLayout) -> bool {
        let config = layout.quilt.sanitized();
        let dims = GridDimensions::compute(&config);
        if let Err(err) = dims.ensure_fits() {
            warn!(error = %err, "Layout import rejected");
            return false;
        }
        self.config = config;
        self.dims = dims;
        if layout.fabric_repeat_inches.is_finite() && layout.fabric_repeat_inches > 0.0 {
            self.fabric_repeat_inches = layout.fabric_repeat_inches;
        }
        let (rows, cols) = (self.dims.cell_rows(), self.dims.cell_cols());
        let declared = (layout.paint_layer.rows(), layout.paint_layer.cols());
        self.paint = layout.paint_layer;
        if self.paint.reconcile(rows, cols) {
            warn!(
                declared_rows = declared.0,
                declared_cols = declared.1,
                rows,
                cols,
                "Imported paint layer did not match the grid, resized"
            );
        }
        self.fabric.clear();
        self.fabric_mode = false;
        self.viewport.pan_by(0, 0, rows, cols);
        self.dirty = false;
        info!(rows, cols, painted = self.paint.painted_count(), "Layout imported");
        true
    }

    /// Current quilt configuration.
    #[must_use]
    pub const fn config(&self) -> &QuiltConfig {
        &self.config
    }

    /// Current grid extents.
    #[must_use]
    pub const fn dims(&self) -> &GridDimensions {
        &self.dims
    }

    /// Read-only paint layer.
    #[must_use]
    pub const fn paint_layer(&self) -> &PaintLayer {
        &self.paint
    }

    /// Region of a cell under the current configuration.
    #[must_use]
    pub fn cell_type(&self, row: usize, col: usize) -> CellType {
        CellType::classify(row, col, &self.config, &self.dims)
    }

    /// Color new strokes use when not painting fabric.
    #[must_use]
    pub fn active_color(&self) -> &str {
        &self.active_color
    }

    /// Raw value the next paint stroke writes.
    ///
    /// The fabric marker when a fabric source is set and fabric mode is on,
    /// otherwise the active color.
    #[must_use]
    pub fn current_paint_value(&self) -> String {
        if self.fabric_mode && self.fabric.source().is_some() {
            FABRIC_MARKER.to_string()
        } else {
            self.active_color.clone()
        }
    }

    /// Saved color slots.
    #[must_use]
    pub const fn saved_colors(&self) -> &SavedColors {
        &self.saved_colors
    }

    /// Fabric load state.
    #[must_use]
    pub const fn fabric(&self) -> &FabricState {
        &self.fabric
    }

    /// Fabric tile size in inches.
    #[must_use]
    pub const fn fabric_repeat_inches(&self) -> f64 {
        self.fabric_repeat_inches
    }

    /// Whether strokes paint fabric.
    #[must_use]
    pub const fn fabric_mode(&self) -> bool {
        self.fabric_mode
    }

    /// Dark-mode flag.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Zoom and pan.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Calculator inputs.
    #[must_use]
    pub const fn calculator(&self) -> &CalculatorInputs {
        &self.calculator
    }

    /// True when configuration or paint changed since the last save/import.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Yardage for the current quilt.
    #[must_use]
    pub fn fabric_breakdown(&self) -> FabricBreakdown {
        yardage::calculate_fabric(&self.config, &self.calculator)
    }

    /// Strip counts for the current quilt.
    #[must_use]
    pub fn strip_breakdown(&self) -> StripBreakdown {
        yardage::calculate_strips(&self.config, &self.calculator)
    }

    /// Finished size of the current quilt.
    #[must_use]
    pub fn quilt_size(&self) -> QuiltSize {
        QuiltSize::of(&self.config)
    }
}

/// Applies a configuration action to `cfg`.
///
/// Returns false, leaving `cfg` alone, for actions that do not edit the
/// configuration.
fn edit_config(cfg: &mut QuiltConfig, action: StoreAction) -> bool {
    match action {
        StoreAction::SetRows(v) => cfg.rows = v,
        StoreAction::SetCols(v) => cfg.cols = v,
        StoreAction::SetBlockWidth(v) => cfg.block_width = v,
        StoreAction::SetBlockHeight(v) => cfg.block_height = v,
        StoreAction::SetSashingWidth(v) => cfg.sashing_width = v,
        StoreAction::SetSashingBorderWidth(v) => cfg.sashing_border_width = v,
        StoreAction::SetBorderWidth(v) => cfg.border_width = v,
        StoreAction::ToggleSashing => cfg.sashing_enabled = !cfg.sashing_enabled,
        StoreAction::ToggleSashingBorder => {
            cfg.sashing_border_enabled = !cfg.sashing_border_enabled;
        }
        StoreAction::SetSashingColor(color) => cfg.sashing_color = color,
        StoreAction::SetSashingBorderColor(color) => cfg.sashing_border_color = color,
        StoreAction::SetBorderColor(color) => cfg.border_color = color,
        StoreAction::SetConfig(next) => *cfg = next,
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_built_grid() {
        let store = QuiltStore::default();
        assert_eq!(store.paint_layer().rows(), 70);
        assert_eq!(store.paint_layer().cols(), 61);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_geometry_change_rebuilds_and_discards_paint() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 10,
            col: 10,
            value: "#ff0000".into(),
        });
        assert!(store.dispatch(StoreAction::SetRows(4)));
        assert_eq!(store.paint_layer().rows(), 90);
        assert_eq!(store.paint_layer().get(10, 10), Some(""));
    }

    #[test]
    fn test_unchanged_extents_keep_paint() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 10,
            col: 10,
            value: "#ff0000".into(),
        });
        assert!(!store.dispatch(StoreAction::SetRows(3)));
        assert!(!store.dispatch(StoreAction::SetBorderColor("#000000".into())));
        assert_eq!(store.paint_layer().get(10, 10), Some("#ff0000"));
    }

    #[test]
    fn test_no_op_edits_stay_clean() {
        let mut store = QuiltStore::default();
        let rows = store.config().rows;
        store.dispatch(StoreAction::SetRows(rows));
        store.dispatch(StoreAction::SetBorderColor(store.config().border_color.clone()));
        store.dispatch(StoreAction::SetConfig(store.config().clone()));
        assert!(!store.is_dirty());

        store.dispatch(StoreAction::SetBorderColor("#010203".into()));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_oversized_geometry_is_rejected() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 10,
            col: 10,
            value: "#ff0000".into(),
        });
        let before = store.config().clone();

        let huge = StoreAction::SetBlockHeight(1e300);
        assert!(store.check_geometry(&huge).is_err());
        assert!(!store.dispatch(huge));
        assert!(!store.dispatch(StoreAction::SetRows(u32::MAX)));

        assert_eq!(store.config(), &before);
        assert_eq!(store.paint_layer().rows(), 70);
        assert_eq!(store.paint_layer().get(10, 10), Some("#ff0000"));
        assert!(store.check_geometry(&StoreAction::SetRows(4)).is_ok());
        assert!(store.check_geometry(&StoreAction::ClearPaint).is_ok());
    }

    #[test]
    fn test_oversized_layout_is_not_imported() {
        let mut store = QuiltStore::default();
        let before = store.export_layout();
        let cfg = QuiltConfig {
            cols: 500,
            block_width: 500.0,
            ..QuiltConfig::default()
        };
        let layout = PersistedLayout::new(cfg, PaintLayer::new(1, 1), 6.0);

        assert!(!store.dispatch(StoreAction::ImportLayout(Box::new(layout))));
        assert_eq!(store.config(), &before.quilt);
        assert_eq!(store.paint_layer(), &before.paint_layer);
    }

    #[test]
    fn test_oversized_new_falls_back_to_default() {
        let cfg = QuiltConfig {
            rows: 1000,
            ..QuiltConfig::default()
        };
        let store = QuiltStore::new(cfg);
        assert_eq!(store.config(), &QuiltConfig::default());
        assert_eq!(store.paint_layer().rows(), 70);
    }

    #[test]
    fn test_build_grid_always_clears() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 0,
            col: 0,
            value: "#ff0000".into(),
        });
        assert!(store.dispatch(StoreAction::BuildGrid));
        assert_eq!(store.paint_layer().painted_count(), 0);
    }

    #[test]
    fn test_setters_clamp_invalid_values() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetCols(0));
        store.dispatch(StoreAction::SetBorderWidth(-4.0));
        assert_eq!(store.config().cols, 1);
        assert_eq!(store.config().border_width, 0.0);
    }

    #[test]
    fn test_out_of_bounds_paint_is_ignored() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: -1,
            col: 3,
            value: "#ff0000".into(),
        });
        store.dispatch(StoreAction::PaintCell {
            row: 500,
            col: 3,
            value: "#ff0000".into(),
        });
        assert_eq!(store.paint_layer().painted_count(), 0);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_paint_value_follows_fabric_mode() {
        let mut store = QuiltStore::default();
        assert_eq!(store.current_paint_value(), "#ffcc00");

        // Fabric mode without a source still paints color
        store.dispatch(StoreAction::ToggleFabricMode);
        assert_eq!(store.current_paint_value(), "#ffcc00");

        store.dispatch(StoreAction::SetFabricSource("denim.png".into()));
        assert!(store.fabric_mode());
        assert_eq!(store.current_paint_value(), FABRIC_MARKER);

        store.dispatch(StoreAction::ClearFabric);
        assert!(!store.fabric_mode());
        assert_eq!(store.current_paint_value(), "#ffcc00");
    }

    #[test]
    fn test_saved_colors() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetActiveColor("#0066ff".into()));
        store.dispatch(StoreAction::SaveColor(1));
        store.dispatch(StoreAction::SetActiveColor("#000000".into()));
        store.dispatch(StoreAction::LoadColor(0));
        assert_eq!(store.active_color(), "#000000");
        store.dispatch(StoreAction::LoadColor(1));
        assert_eq!(store.active_color(), "#0066ff");
        store.dispatch(StoreAction::ClearSavedColor(1));
        assert_eq!(store.saved_colors().get(1), None);
    }

    #[test]
    fn test_zoom_and_repeat_validation() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetZoom(20));
        assert_eq!(store.viewport().zoom_percent, 50);
        store.dispatch(StoreAction::SetFabricRepeat(0.0));
        assert_eq!(store.fabric_repeat_inches(), 6.0);
        store.dispatch(StoreAction::SetFabricRepeat(4.5));
        assert_eq!(store.fabric_repeat_inches(), 4.5);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetBorderColor("#123456".into()));
        store.dispatch(StoreAction::PaintRect {
            min_row: 0,
            max_row: 2,
            min_col: 0,
            max_col: 2,
            value: "#ff0000".into(),
        });
        let text = parser::serialize(&store.export_layout()).unwrap();

        let mut other = QuiltStore::default();
        other.dispatch(StoreAction::SetFabricSource("x.png".into()));
        other.import_str(&text).unwrap();
        assert_eq!(other.config(), store.config());
        assert_eq!(other.paint_layer(), store.paint_layer());
        assert!(!other.fabric_mode());
        assert_eq!(other.fabric().source(), None);
        assert!(!other.is_dirty());
    }

    #[test]
    fn test_failed_import_leaves_state() {
        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::PaintCell {
            row: 1,
            col: 1,
            value: "#ff0000".into(),
        });
        let before = store.export_layout();

        let mut doc = serde_json::to_value(&before).unwrap();
        doc["version"] = serde_json::json!(2);
        let err = store.import_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, LayoutError::VersionMismatch { .. }));
        assert!(store.import_str("{{{").is_err());

        assert_eq!(store.config(), &before.quilt);
        assert_eq!(store.paint_layer(), &before.paint_layer);
    }

    #[test]
    fn test_import_reconciles_paint_size() {
        let cfg = QuiltConfig {
            rows: 1,
            cols: 1,
            block_width: 4.0,
            block_height: 3.0,
            sashing_border_enabled: false,
            border_width: 0.0,
            ..QuiltConfig::default()
        };
        let mut paint = PaintLayer::new(5, 5);
        paint.paint_cell(0, 0, "#ff0000");
        paint.paint_cell(4, 4, "#00ff00");
        let layout = PersistedLayout::new(cfg, paint, 6.0);

        let store = QuiltStore::from_layout(layout);
        assert_eq!(store.paint_layer().rows(), 3);
        assert_eq!(store.paint_layer().cols(), 4);
        assert_eq!(store.paint_layer().get(0, 0), Some("#ff0000"));
        assert_eq!(store.paint_layer().painted_count(), 1);
    }

    #[test]
    fn test_with_config_seeds_defaults() {
        let mut app = Config::default();
        app.calculator.wof = 44.0;
        app.paint.active_color = "#00aa55".to_string();
        app.paint.fabric_repeat_inches = 8.0;
        app.ui.zoom_percent = 150;

        let store = QuiltStore::with_config(&app);
        assert_eq!(store.calculator().wof, 44.0);
        assert_eq!(store.active_color(), "#00aa55");
        assert_eq!(store.fabric_repeat_inches(), 8.0);
        assert_eq!(store.viewport().zoom_percent, 150);
    }

    #[test]
    fn test_breakdowns_use_calculator_inputs() {
        let mut store = QuiltStore::default();
        assert_eq!(store.fabric_breakdown().total, 8.25);
        store.dispatch(StoreAction::SetWof(60.0));
        assert!(store.fabric_breakdown().total < 8.25);
        assert_eq!(store.quilt_size().width_in, 61.0);
    }
}

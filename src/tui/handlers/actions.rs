//! Maps shortcut actions to editor and store operations.

use anyhow::Result;
use tracing::debug;

use crate::models::viewport::ZOOM_STEP;
use crate::models::DragSelection;
use crate::shortcuts::Action;
use crate::store::StoreAction;
use crate::tui::prompt::FilePromptMode;
use crate::tui::{
    quilt_view, report_error, ActiveComponent, AppState, CalculatorPanel, ColorPicker, FilePrompt,
    HelpOverlay, SettingsPanel, UnsavedPrompt,
};

/// Cells moved per pan step.
const PAN_STEP: i64 = 5;

/// Executes an action. Returns true when the editor should exit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    debug!(action = action.id(), "Dispatching action");
    match action {
        Action::NavigateUp => state.move_cursor(-1, 0),
        Action::NavigateDown => state.move_cursor(1, 0),
        Action::NavigateLeft => state.move_cursor(0, -1),
        Action::NavigateRight => state.move_cursor(0, 1),
        Action::JumpToFirst => state.set_cursor(0, 0),
        Action::JumpToLast => {
            let rows = state.store.paint_layer().rows();
            let cols = state.store.paint_layer().cols();
            state.set_cursor(rows.saturating_sub(1), cols.saturating_sub(1));
        }
        Action::PanUp => pan(state, -PAN_STEP, 0),
        Action::PanDown => pan(state, PAN_STEP, 0),
        Action::PanLeft => pan(state, 0, -PAN_STEP),
        Action::PanRight => pan(state, 0, PAN_STEP),

        Action::PaintCell => {
            let value = state.store.current_paint_value();
            paint_at_cursor(state, value);
        }
        Action::EraseCell => paint_at_cursor(state, String::new()),
        Action::StartRectangleSelect => {
            if state.selection.take().is_some() {
                state.set_status("Selection cancelled");
            } else {
                let (row, col) = cursor_i64(state);
                state.selection = Some(DragSelection::new(row, col));
                state.set_status("Selecting: move the cursor, Enter to paint, Esc to cancel");
            }
        }
        Action::ApplySelection => {
            let value = state.store.current_paint_value();
            if let Some(selection) = state.selection.take() {
                state.dispatch(StoreAction::from_stroke(selection.stroke(), value));
                let (r0, r1, c0, c1) = selection.bounds();
                state.set_status(format!("Painted {} cell(s)", (r1 - r0 + 1) * (c1 - c0 + 1)));
            } else {
                paint_at_cursor(state, value);
            }
        }
        Action::ClearPaint => {
            state.dispatch(StoreAction::ClearPaint);
            state.set_status("Paint cleared");
        }
        Action::BuildGrid => {
            state.dispatch(StoreAction::BuildGrid);
            state.set_status(format!(
                "Grid built: {} x {} cells",
                state.store.paint_layer().rows(),
                state.store.paint_layer().cols()
            ));
        }

        Action::OpenColorPicker => {
            let picker = ColorPicker::with_color(state.store.active_color());
            state.open(ActiveComponent::ColorPicker(picker));
        }
        Action::LoadSavedColor(slot) => {
            if state.store.saved_colors().get(slot).is_some() {
                state.dispatch(StoreAction::LoadColor(slot));
                state.set_status(format!(
                    "Brush color {} (slot {})",
                    state.store.active_color(),
                    slot + 1
                ));
            } else {
                state.set_status(format!("Slot {} is empty", slot + 1));
            }
        }
        Action::ToggleFabricMode => {
            if state.store.fabric().source().is_none() {
                state.open(ActiveComponent::FilePrompt(FilePrompt::new(
                    FilePromptMode::Fabric,
                    None,
                )));
            } else {
                state.dispatch(StoreAction::ToggleFabricMode);
                let mode = if state.store.fabric_mode() {
                    "fabric"
                } else {
                    "color"
                };
                state.set_status(format!("Painting with {mode}"));
            }
        }
        Action::LoadFabric => {
            let initial = state.store.fabric().source().map(String::from);
            state.open(ActiveComponent::FilePrompt(FilePrompt::new(
                FilePromptMode::Fabric,
                initial,
            )));
        }

        Action::OpenSettings => state.open(ActiveComponent::Settings(SettingsPanel::new())),
        Action::OpenCalculator => state.open(ActiveComponent::Calculator(CalculatorPanel)),

        Action::ZoomIn => {
            let zoom = state.store.viewport().zoom_percent.saturating_add(ZOOM_STEP);
            zoom_to(state, zoom);
        }
        Action::ZoomOut => {
            let zoom = state.store.viewport().zoom_percent.saturating_sub(ZOOM_STEP);
            zoom_to(state, zoom);
        }
        Action::FitToScreen => {
            let zoom = quilt_view::fit_zoom_for(
                state.grid_area,
                state.store.paint_layer().rows(),
                state.store.paint_layer().cols(),
            );
            let viewport = *state.store.viewport();
            state.dispatch(StoreAction::SetZoom(zoom));
            state.dispatch(StoreAction::Pan {
                d_row: -viewport.pan_row,
                d_col: -viewport.pan_col,
            });
            state.set_status(format!("Zoom {zoom}%"));
        }
        Action::ToggleTheme => {
            state.dispatch(StoreAction::ToggleDarkMode);
            let name = if state.store.dark_mode() {
                "Dark"
            } else {
                "Light"
            };
            state.set_status(format!("{name} theme"));
        }

        Action::Save => {
            if let Err(e) = state.save(None) {
                report_error(state, "Failed to save layout", &e);
            }
        }
        Action::SaveAs => {
            let initial = state
                .source_path
                .as_ref()
                .map(|p| p.display().to_string());
            state.open(ActiveComponent::FilePrompt(FilePrompt::new(
                FilePromptMode::SaveAs,
                initial,
            )));
        }
        Action::Import => {
            state.open(ActiveComponent::FilePrompt(FilePrompt::new(
                FilePromptMode::Import,
                None,
            )));
        }
        Action::Quit => {
            if state.store.is_dirty() {
                state.open(ActiveComponent::UnsavedPrompt(UnsavedPrompt));
            } else {
                state.should_quit = true;
                return Ok(true);
            }
        }

        Action::ToggleHelp => state.open(ActiveComponent::Help(HelpOverlay::new())),
        Action::Cancel => {
            if state.selection.take().is_some() || state.mouse_drag.take().is_some() {
                state.set_status("Selection cancelled");
            }
        }
    }
    Ok(false)
}

fn cursor_i64(state: &AppState) -> (i64, i64) {
    let (row, col) = state.cursor;
    (
        i64::try_from(row).unwrap_or(i64::MAX),
        i64::try_from(col).unwrap_or(i64::MAX),
    )
}

fn paint_at_cursor(state: &mut AppState, value: String) {
    let (row, col) = cursor_i64(state);
    state.dispatch(StoreAction::PaintCell { row, col, value });
}

fn pan(state: &mut AppState, d_row: i64, d_col: i64) {
    state.dispatch(StoreAction::Pan { d_row, d_col });
}

fn zoom_to(state: &mut AppState, zoom: u16) {
    state.dispatch(StoreAction::SetZoom(zoom));
    let (row, col) = state.cursor;
    state.set_cursor(row, col);
    state.set_status(format!("Zoom {}%", state.store.viewport().zoom_percent));
}

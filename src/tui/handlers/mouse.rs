//! Mouse input for the quilt grid: drag to paint, right click to erase,
//! wheel to pan.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::models::DragSelection;
use crate::store::StoreAction;
use crate::tui::{quilt_view, AppState};

/// Cells panned per wheel notch.
const WHEEL_STEP: i64 = 3;

/// Handles a mouse event on the main screen.
///
/// Ignored while a popup or an error is shown.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.active_component.is_some() || state.error_message.is_some() {
        return;
    }
    let hit = quilt_view::hit_test(
        state.grid_area,
        state.store.viewport(),
        mouse.column,
        mouse.row,
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((row, col)) = hit {
                state.mouse_drag = Some(DragSelection::new(row, col));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let (Some(drag), Some((row, col))) = (state.mouse_drag.as_mut(), hit) {
                drag.update(row, col);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(drag) = state.mouse_drag.take() {
                let value = state.store.current_paint_value();
                state.dispatch(StoreAction::from_stroke(drag.stroke(), value));
                if let Some((row, col)) = hit {
                    move_cursor_to(state, row, col);
                }
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some((row, col)) = hit {
                state.dispatch(StoreAction::PaintCell {
                    row,
                    col,
                    value: String::new(),
                });
            }
        }
        MouseEventKind::ScrollUp if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            pan(state, 0, -WHEEL_STEP);
        }
        MouseEventKind::ScrollDown if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            pan(state, 0, WHEEL_STEP);
        }
        MouseEventKind::ScrollUp => pan(state, -WHEEL_STEP, 0),
        MouseEventKind::ScrollDown => pan(state, WHEEL_STEP, 0),
        MouseEventKind::ScrollLeft => pan(state, 0, -WHEEL_STEP),
        MouseEventKind::ScrollRight => pan(state, 0, WHEEL_STEP),
        _ => {}
    }
}

fn pan(state: &mut AppState, d_row: i64, d_col: i64) {
    state.dispatch(StoreAction::Pan { d_row, d_col });
}

fn move_cursor_to(state: &mut AppState, row: i64, col: i64) {
    if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) {
        state.cursor = (row, col);
        state.clamp_cursor();
    }
}

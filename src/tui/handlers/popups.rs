//! Popup input handlers.
//!
//! The open component is taken out of the state while it handles a key,
//! so its events can freely mutate [`AppState`]. Components that stay open
//! are put back afterwards.

use anyhow::Result;
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::store::StoreAction;
use crate::tui::calculator_panel::CalculatorEvent;
use crate::tui::color_picker::ColorPickerEvent;
use crate::tui::help_overlay::HelpOverlayEvent;
use crate::tui::prompt::{FilePromptEvent, FilePromptMode, UnsavedPromptEvent};
use crate::tui::settings_panel::{SettingItem, SettingsEvent};
use crate::tui::{
    report_error, ActiveComponent, AppState, Component, ContextualComponent, SettingsPanel,
};

/// Routes a key to the open popup. Returns true when the editor should exit.
pub fn handle_popup_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    let Some(component) = state.active_component.take() else {
        return Ok(false);
    };

    match component {
        ActiveComponent::ColorPicker(mut picker) => {
            match picker.handle_input(key, state.store.saved_colors()) {
                Some(ColorPickerEvent::Apply(color)) => {
                    state.dispatch(StoreAction::SetActiveColor(color.clone()));
                    state.set_status(format!("Brush color {color}"));
                }
                Some(ColorPickerEvent::SaveSlot { slot, color }) => {
                    state.dispatch(StoreAction::SetActiveColor(color.clone()));
                    state.dispatch(StoreAction::SaveColor(slot));
                    state.set_status(format!("Saved {color} to slot {}", slot + 1));
                    state.open(ActiveComponent::ColorPicker(picker));
                }
                Some(ColorPickerEvent::ClearSlot(slot)) => {
                    state.dispatch(StoreAction::ClearSavedColor(slot));
                    state.set_status(format!("Cleared slot {}", slot + 1));
                    state.open(ActiveComponent::ColorPicker(picker));
                }
                Some(ColorPickerEvent::Cancelled) => state.set_status("Color unchanged"),
                None => state.open(ActiveComponent::ColorPicker(picker)),
            }
        }
        ActiveComponent::Settings(mut panel) => match panel.handle_input(key, &state.store) {
            Some(SettingsEvent::Apply(action)) => {
                debug!(?action, "Applying setting");
                if let Err(err) = state.store.check_geometry(&action) {
                    state.set_error(err.to_string());
                } else if state.dispatch(action) {
                    state.set_status(format!(
                        "Grid rebuilt: {} x {} cells (paint cleared)",
                        state.store.paint_layer().rows(),
                        state.store.paint_layer().cols()
                    ));
                } else {
                    state.set_status("Updated");
                }
                state.open(ActiveComponent::Settings(panel));
            }
            Some(SettingsEvent::Closed) => state.set_status("Press ? for help"),
            None => state.open(ActiveComponent::Settings(panel)),
        },
        ActiveComponent::Calculator(mut panel) => match panel.handle_input(key, &state.store) {
            Some(CalculatorEvent::Closed) => state.set_status("Press ? for help"),
            Some(CalculatorEvent::EditInputs) => state.open(ActiveComponent::Settings(
                SettingsPanel::focused_on(SettingItem::Wof),
            )),
            None => state.open(ActiveComponent::Calculator(panel)),
        },
        ActiveComponent::Help(mut overlay) => match overlay.handle_input(key) {
            Some(HelpOverlayEvent::Closed) => state.set_status("Press ? for help"),
            None => state.open(ActiveComponent::Help(overlay)),
        },
        ActiveComponent::FilePrompt(mut prompt) => match prompt.handle_input(key) {
            Some(FilePromptEvent::Confirmed(mode, path)) => match mode {
                FilePromptMode::SaveAs => {
                    if let Err(e) = state.save(Some(path)) {
                        report_error(state, "Failed to save layout", &e);
                    }
                }
                FilePromptMode::Import => {
                    if let Err(e) = state.import(&path) {
                        report_error(state, "Failed to import layout", &e);
                    }
                }
                FilePromptMode::Fabric => state.load_fabric(path),
            },
            Some(FilePromptEvent::Cancelled) => state.set_status("Cancelled"),
            None => state.open(ActiveComponent::FilePrompt(prompt)),
        },
        ActiveComponent::UnsavedPrompt(mut prompt) => match prompt.handle_input(key) {
            Some(UnsavedPromptEvent::SaveAndQuit) => match state.save(None) {
                Ok(_) => {
                    state.should_quit = true;
                    return Ok(true);
                }
                Err(e) => report_error(state, "Failed to save layout", &e),
            },
            Some(UnsavedPromptEvent::Discard) => {
                state.should_quit = true;
                return Ok(true);
            }
            Some(UnsavedPromptEvent::Cancelled) => state.set_status("Quit cancelled"),
            None => state.open(ActiveComponent::UnsavedPrompt(prompt)),
        },
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::QuiltStore;
    use crate::tui::prompt::FilePrompt;
    use crate::tui::{CalculatorPanel, ColorPicker, UnsavedPrompt};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_popup_input(state, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn state() -> AppState {
        AppState::new(QuiltStore::default(), Config::default(), None)
    }

    #[test]
    fn test_color_picker_apply_sets_brush_and_closes() {
        let mut state = state();
        state.open(ActiveComponent::ColorPicker(ColorPicker::with_color(
            "#123456",
        )));
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();
        assert_eq!(state.store.active_color(), "#123456");
        assert!(state.active_component.is_none());
    }

    #[test]
    fn test_color_picker_stays_open_for_unhandled_keys() {
        let mut state = state();
        state.open(ActiveComponent::ColorPicker(ColorPicker::with_color(
            "#123456",
        )));
        handle_popup_input(&mut state, key(KeyCode::Char('z'))).unwrap();
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::ColorPicker(_))
        ));
    }

    #[test]
    fn test_settings_apply_keeps_panel_open() {
        let mut state = state();
        state.open(ActiveComponent::Settings(SettingsPanel::focused_on(
            SettingItem::Rows,
        )));
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();
        // Replace the current value with 4
        for _ in 0..8 {
            handle_popup_input(&mut state, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut state, "4");
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();

        assert_eq!(state.store.config().rows, 4);
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::Settings(_))
        ));
    }

    #[test]
    fn test_settings_reports_oversized_grid() {
        let mut state = state();
        state.open(ActiveComponent::Settings(SettingsPanel::focused_on(
            SettingItem::BlockHeight,
        )));
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();
        for _ in 0..8 {
            handle_popup_input(&mut state, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut state, "900");
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();

        assert_eq!(state.store.config().block_height, 18.0);
        assert!(state
            .error_message
            .as_deref()
            .unwrap()
            .contains("largest supported grid"));
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::Settings(_))
        ));
    }

    #[test]
    fn test_calculator_edit_switches_to_settings() {
        let mut state = state();
        state.open(ActiveComponent::Calculator(CalculatorPanel));
        handle_popup_input(&mut state, key(KeyCode::Char('e'))).unwrap();
        match &state.active_component {
            Some(ActiveComponent::Settings(panel)) => {
                assert_eq!(panel.selected_item(), SettingItem::Wof);
            }
            _ => panic!("expected settings panel"),
        }
    }

    #[test]
    fn test_save_as_prompt_writes_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("quilt");
        let mut state = state();
        state.open(ActiveComponent::FilePrompt(FilePrompt::new(
            FilePromptMode::SaveAs,
            Some(target.display().to_string()),
        )));
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();

        let written = dir.path().join("quilt.json");
        assert!(written.exists());
        assert_eq!(state.source_path.as_deref(), Some(written.as_path()));
        assert!(state.active_component.is_none());
        assert!(!state.store.is_dirty());
    }

    #[test]
    fn test_unsaved_prompt_discard_quits() {
        let mut state = state();
        state.open(ActiveComponent::UnsavedPrompt(UnsavedPrompt));
        assert!(handle_popup_input(&mut state, key(KeyCode::Char('q'))).unwrap());
        assert!(state.should_quit);
    }

    #[test]
    fn test_unsaved_prompt_escape_keeps_editing() {
        let mut state = state();
        state.open(ActiveComponent::UnsavedPrompt(UnsavedPrompt));
        assert!(!handle_popup_input(&mut state, key(KeyCode::Esc)).unwrap());
        assert!(!state.should_quit);
        assert!(state.active_component.is_none());
    }
}

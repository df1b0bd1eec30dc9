//! Centralized shortcut and action system.
//!
//! This module provides a unified system for keyboard shortcuts and actions,
//! connecting help text definitions with actual event handling logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::models::SAVED_SLOTS;

/// All possible actions in the editor.
///
/// This enum represents every action a user can take. It serves as the
/// bridge between keyboard shortcuts and application behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    JumpToFirst,
    JumpToLast,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,

    // === PAINTING ===
    PaintCell,
    EraseCell,
    StartRectangleSelect,
    ApplySelection,
    ClearPaint,
    BuildGrid,

    // === COLORS & FABRIC ===
    OpenColorPicker,
    LoadSavedColor(usize),
    ToggleFabricMode,
    LoadFabric,

    // === PANELS ===
    OpenSettings,
    OpenCalculator,

    // === VIEW ===
    ZoomIn,
    ZoomOut,
    FitToScreen,
    ToggleTheme,

    // === FILE OPERATIONS ===
    Save,
    SaveAs,
    Import,
    Quit,

    // === HELP ===
    ToggleHelp,

    // === GENERAL ===
    Cancel,
}

/// Help section an action is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionCategory {
    Navigation,
    Painting,
    Colors,
    Panels,
    View,
    File,
    System,
}

impl ActionCategory {
    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Navigation => "NAVIGATION",
            Self::Painting => "PAINTING",
            Self::Colors => "COLORS & FABRIC",
            Self::Panels => "PANELS",
            Self::View => "VIEW",
            Self::File => "FILE OPERATIONS",
            Self::System => "SYSTEM",
        }
    }
}

impl Action {
    /// Stable identifier, used in logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::NavigateLeft => "navigate_left",
            Self::NavigateRight => "navigate_right",
            Self::JumpToFirst => "jump_first",
            Self::JumpToLast => "jump_last",
            Self::PanUp => "pan_up",
            Self::PanDown => "pan_down",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::PaintCell => "paint_cell",
            Self::EraseCell => "erase_cell",
            Self::StartRectangleSelect => "rectangle_select",
            Self::ApplySelection => "apply_selection",
            Self::ClearPaint => "clear_paint",
            Self::BuildGrid => "build_grid",
            Self::OpenColorPicker => "open_color_picker",
            Self::LoadSavedColor(_) => "load_saved_color",
            Self::ToggleFabricMode => "toggle_fabric_mode",
            Self::LoadFabric => "load_fabric",
            Self::OpenSettings => "open_settings",
            Self::OpenCalculator => "open_calculator",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::FitToScreen => "fit_to_screen",
            Self::ToggleTheme => "toggle_theme",
            Self::Save => "save",
            Self::SaveAs => "save_as",
            Self::Import => "import",
            Self::Quit => "quit",
            Self::ToggleHelp => "toggle_help",
            Self::Cancel => "cancel",
        }
    }

    /// One-line help text.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp => "Move cursor up",
            Self::NavigateDown => "Move cursor down",
            Self::NavigateLeft => "Move cursor left",
            Self::NavigateRight => "Move cursor right",
            Self::JumpToFirst => "Jump to the top-left cell",
            Self::JumpToLast => "Jump to the bottom-right cell",
            Self::PanUp => "Scroll the view up",
            Self::PanDown => "Scroll the view down",
            Self::PanLeft => "Scroll the view left",
            Self::PanRight => "Scroll the view right",
            Self::PaintCell => "Paint the cell under the cursor",
            Self::EraseCell => "Erase the cell under the cursor",
            Self::StartRectangleSelect => "Start a rectangle selection",
            Self::ApplySelection => "Paint the selected rectangle",
            Self::ClearPaint => "Erase all paint",
            Self::BuildGrid => "Rebuild the grid (discards paint)",
            Self::OpenColorPicker => "Open the color picker",
            Self::LoadSavedColor(_) => "Use a saved color slot",
            Self::ToggleFabricMode => "Toggle painting with fabric",
            Self::LoadFabric => "Load a fabric image",
            Self::OpenSettings => "Edit quilt settings",
            Self::OpenCalculator => "Show fabric yardage",
            Self::ZoomIn => "Zoom in",
            Self::ZoomOut => "Zoom out",
            Self::FitToScreen => "Zoom to fit the window",
            Self::ToggleTheme => "Toggle dark/light theme",
            Self::Save => "Save layout",
            Self::SaveAs => "Save layout to a new file",
            Self::Import => "Open a layout file",
            Self::Quit => "Quit (prompts if unsaved changes)",
            Self::ToggleHelp => "Toggle this help",
            Self::Cancel => "Cancel selection",
        }
    }

    /// Help section for this action.
    #[must_use]
    pub const fn category(&self) -> ActionCategory {
        match self {
            Self::NavigateUp
            | Self::NavigateDown
            | Self::NavigateLeft
            | Self::NavigateRight
            | Self::JumpToFirst
            | Self::JumpToLast
            | Self::PanUp
            | Self::PanDown
            | Self::PanLeft
            | Self::PanRight => ActionCategory::Navigation,
            Self::PaintCell
            | Self::EraseCell
            | Self::StartRectangleSelect
            | Self::ApplySelection
            | Self::ClearPaint
            | Self::BuildGrid => ActionCategory::Painting,
            Self::OpenColorPicker
            | Self::LoadSavedColor(_)
            | Self::ToggleFabricMode
            | Self::LoadFabric => ActionCategory::Colors,
            Self::OpenSettings | Self::OpenCalculator => ActionCategory::Panels,
            Self::ZoomIn | Self::ZoomOut | Self::FitToScreen | Self::ToggleTheme => {
                ActionCategory::View
            }
            Self::Save | Self::SaveAs | Self::Import | Self::Quit => ActionCategory::File,
            Self::ToggleHelp | Self::Cancel => ActionCategory::System,
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
///
/// This is the central source of truth for all keyboard shortcuts in the application.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable label such as `Ctrl+S` or `Shift+Up`.
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };
        // Uppercase letters already say Shift.
        let shifted_char = matches!(self.code, KeyCode::Char(c) if !c.is_ascii_lowercase());
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else if self.modifiers.contains(KeyModifiers::SHIFT) && !shifted_char {
            format!("Shift+{key}")
        } else {
            key
        }
    }
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    /// Register all shortcuts for the main context.
    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = "main";

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);
        self.register(ctx, K::Up, M::SHIFT, Action::PanUp);
        self.register(ctx, K::Down, M::SHIFT, Action::PanDown);
        self.register(ctx, K::Left, M::SHIFT, Action::PanLeft);
        self.register(ctx, K::Right, M::SHIFT, Action::PanRight);

        // === PAINTING ===
        self.register(ctx, K::Char(' '), M::NONE, Action::PaintCell);
        self.register(ctx, K::Char('x'), M::NONE, Action::EraseCell);
        self.register(ctx, K::Delete, M::NONE, Action::EraseCell);
        self.register(ctx, K::Char('v'), M::NONE, Action::StartRectangleSelect);
        self.register(ctx, K::Enter, M::NONE, Action::ApplySelection);
        self.register(ctx, K::Char('X'), M::SHIFT, Action::ClearPaint);
        self.register(ctx, K::Char('b'), M::NONE, Action::BuildGrid);

        // === COLORS & FABRIC ===
        self.register(ctx, K::Char('c'), M::NONE, Action::OpenColorPicker);
        for slot in 0..SAVED_SLOTS {
            if let Some(digit) = char::from_digit(u32::try_from(slot + 1).unwrap_or(0), 10) {
                self.register(ctx, K::Char(digit), M::NONE, Action::LoadSavedColor(slot));
            }
        }
        self.register(ctx, K::Char('f'), M::NONE, Action::ToggleFabricMode);
        self.register(ctx, K::Char('F'), M::SHIFT, Action::LoadFabric);

        // === PANELS ===
        self.register(ctx, K::Char('s'), M::NONE, Action::OpenSettings);
        self.register(ctx, K::Char('y'), M::NONE, Action::OpenCalculator);

        // === VIEW ===
        self.register(ctx, K::Char('+'), M::NONE, Action::ZoomIn);
        self.register(ctx, K::Char('+'), M::SHIFT, Action::ZoomIn);
        self.register(ctx, K::Char('='), M::NONE, Action::ZoomIn);
        self.register(ctx, K::Char('-'), M::NONE, Action::ZoomOut);
        self.register(ctx, K::Char('0'), M::NONE, Action::FitToScreen);
        self.register(ctx, K::Char('t'), M::NONE, Action::ToggleTheme);

        // === FILE OPERATIONS ===
        self.register(ctx, K::Char('s'), M::CONTROL, Action::Save);
        self.register(ctx, K::Char('S'), M::SHIFT, Action::SaveAs);
        self.register(ctx, K::Char('o'), M::NONE, Action::Import);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);

        // === HELP ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('?'), M::SHIFT, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }

    /// Key labels per action in a context, grouped for the help overlay.
    ///
    /// Saved color slots are folded into one `1-6` entry. Entries are sorted
    /// by category, then by description.
    #[must_use]
    pub fn help_entries(&self, context: &str) -> Vec<(ActionCategory, String, &'static str)> {
        let mut by_action: HashMap<Action, Vec<String>> = HashMap::new();
        for ((ctx, binding), action) in &self.bindings {
            if ctx != context {
                continue;
            }
            let action = match action {
                Action::LoadSavedColor(_) => Action::LoadSavedColor(0),
                other => *other,
            };
            by_action.entry(action).or_default().push(binding.label());
        }

        let mut entries: Vec<_> = by_action
            .into_iter()
            .map(|(action, mut labels)| {
                labels.sort();
                labels.dedup();
                let keys = if matches!(action, Action::LoadSavedColor(_)) {
                    format!("1-{SAVED_SLOTS}")
                } else {
                    labels.join(" / ")
                };
                (action.category(), keys, action.description())
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.2.cmp(b.2)));
        entries
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

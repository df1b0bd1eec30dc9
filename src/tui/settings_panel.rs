//! Settings panel for quilt geometry, frame colors and calculator inputs.
//!
//! Every value is edited as free text and run through the lenient parsers in
//! [`crate::services::sanitize`], so whatever the user types ends up as a
//! valid configuration. Committing a field emits the matching
//! [`StoreAction`]; the panel never mutates the store itself.
//!
//! Geometry changes that alter the grid extents rebuild the grid and clear
//! the paint.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::models::RgbColor;
use crate::services::sanitize;
use crate::store::{QuiltStore, StoreAction};
use crate::tui::component::{centered_rect, ContextualComponent};
use crate::tui::prompt::help_line;
use crate::tui::Theme;

/// Setting group for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingGroup {
    /// Block grid
    Grid,
    /// Sashing, sashing border and outer border
    Frame,
    /// Fabric tiling
    Fabric,
    /// Cutting inputs for the calculator
    Calculator,
}

impl SettingGroup {
    /// Returns display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Grid => "Blocks",
            Self::Frame => "Sashing & Borders",
            Self::Fabric => "Fabric",
            Self::Calculator => "Calculator",
        }
    }
}

/// Available settings that can be configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingItem {
    /// Number of block rows
    Rows,
    /// Number of block columns
    Cols,
    /// Block width
    BlockWidth,
    /// Block height
    BlockHeight,
    /// Sashing on/off
    Sashing,
    /// Sashing width
    SashingWidth,
    /// Sashing color
    SashingColor,
    /// Sashing border on/off
    SashingBorder,
    /// Sashing border width
    SashingBorderWidth,
    /// Sashing border color
    SashingBorderColor,
    /// Outer border width
    BorderWidth,
    /// Outer border color
    BorderColor,
    /// Fabric repeat size
    FabricRepeat,
    /// Width of fabric
    Wof,
    /// Seam allowance
    Seam,
    /// Sashing strip cut width
    SashStripWidth,
    /// Binding strip cut width
    BindingStripWidth,
}

impl SettingItem {
    /// All settings in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Rows,
            Self::Cols,
            Self::BlockWidth,
            Self::BlockHeight,
            Self::Sashing,
            Self::SashingWidth,
            Self::SashingColor,
            Self::SashingBorder,
            Self::SashingBorderWidth,
            Self::SashingBorderColor,
            Self::BorderWidth,
            Self::BorderColor,
            Self::FabricRepeat,
            Self::Wof,
            Self::Seam,
            Self::SashStripWidth,
            Self::BindingStripWidth,
        ]
    }

    /// Returns display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Rows => "Rows",
            Self::Cols => "Columns",
            Self::BlockWidth => "Block width (in)",
            Self::BlockHeight => "Block height (in)",
            Self::Sashing => "Sashing",
            Self::SashingWidth => "Sashing width (in)",
            Self::SashingColor => "Sashing color",
            Self::SashingBorder => "Sashing border",
            Self::SashingBorderWidth => "Sashing border width (in)",
            Self::SashingBorderColor => "Sashing border color",
            Self::BorderWidth => "Border width (in)",
            Self::BorderColor => "Border color",
            Self::FabricRepeat => "Fabric repeat (in)",
            Self::Wof => "Width of fabric (in)",
            Self::Seam => "Seam allowance (in)",
            Self::SashStripWidth => "Sashing strip width (in)",
            Self::BindingStripWidth => "Binding strip width (in)",
        }
    }

    /// Group the setting is listed under.
    #[must_use]
    pub const fn group(&self) -> SettingGroup {
        match self {
            Self::Rows | Self::Cols | Self::BlockWidth | Self::BlockHeight => SettingGroup::Grid,
            Self::Sashing
            | Self::SashingWidth
            | Self::SashingColor
            | Self::SashingBorder
            | Self::SashingBorderWidth
            | Self::SashingBorderColor
            | Self::BorderWidth
            | Self::BorderColor => SettingGroup::Frame,
            Self::FabricRepeat => SettingGroup::Fabric,
            Self::Wof | Self::Seam | Self::SashStripWidth | Self::BindingStripWidth => {
                SettingGroup::Calculator
            }
        }
    }

    const fn is_toggle(self) -> bool {
        matches!(self, Self::Sashing | Self::SashingBorder)
    }

    /// Current value as shown in the list and used to seed the editor.
    #[must_use]
    pub fn current_value(self, store: &QuiltStore) -> String {
        let cfg = store.config();
        let calc = store.calculator();
        let on_off = |b: bool| if b { "On" } else { "Off" }.to_string();
        match self {
            Self::Rows => cfg.rows.to_string(),
            Self::Cols => cfg.cols.to_string(),
            Self::BlockWidth => cfg.block_width.to_string(),
            Self::BlockHeight => cfg.block_height.to_string(),
            Self::Sashing => on_off(cfg.sashing_enabled),
            Self::SashingWidth => cfg.sashing_width.to_string(),
            Self::SashingColor => cfg.sashing_color.clone(),
            Self::SashingBorder => on_off(cfg.sashing_border_enabled),
            Self::SashingBorderWidth => cfg.sashing_border_width.to_string(),
            Self::SashingBorderColor => cfg.sashing_border_color.clone(),
            Self::BorderWidth => cfg.border_width.to_string(),
            Self::BorderColor => cfg.border_color.clone(),
            Self::FabricRepeat => store.fabric_repeat_inches().to_string(),
            Self::Wof => calc.wof.to_string(),
            Self::Seam => calc.seam.to_string(),
            Self::SashStripWidth => calc.sash_strip_width.to_string(),
            Self::BindingStripWidth => calc.binding_strip_width.to_string(),
        }
    }

    /// Turns edited text into the action that applies it.
    ///
    /// # Errors
    ///
    /// Returns a message for colors that do not parse and non-positive
    /// repeat sizes; numeric fields always produce a (clamped) value.
    pub fn parse(self, text: &str) -> Result<StoreAction, String> {
        let color = |text: &str| RgbColor::normalize(text).map_err(|e| e.to_string());
        Ok(match self {
            Self::Rows => StoreAction::SetRows(sanitize::parse_count(text)),
            Self::Cols => StoreAction::SetCols(sanitize::parse_count(text)),
            Self::BlockWidth => StoreAction::SetBlockWidth(sanitize::parse_block_length(text)),
            Self::BlockHeight => StoreAction::SetBlockHeight(sanitize::parse_block_length(text)),
            Self::Sashing => StoreAction::ToggleSashing,
            Self::SashingBorder => StoreAction::ToggleSashingBorder,
            Self::SashingWidth => StoreAction::SetSashingWidth(sanitize::parse_frame_width(text)),
            Self::SashingBorderWidth => {
                StoreAction::SetSashingBorderWidth(sanitize::parse_frame_width(text))
            }
            Self::BorderWidth => StoreAction::SetBorderWidth(sanitize::parse_frame_width(text)),
            Self::SashingColor => StoreAction::SetSashingColor(color(text)?),
            Self::SashingBorderColor => StoreAction::SetSashingBorderColor(color(text)?),
            Self::BorderColor => StoreAction::SetBorderColor(color(text)?),
            Self::FabricRepeat => StoreAction::SetFabricRepeat(
                sanitize::parse_repeat(text).ok_or("Repeat must be a positive number")?,
            ),
            Self::Wof => StoreAction::SetWof(sanitize::parse_wof(text)),
            Self::Seam => StoreAction::SetSeam(sanitize::parse_non_negative(text)),
            Self::SashStripWidth => {
                StoreAction::SetSashStripWidth(sanitize::parse_non_negative(text))
            }
            Self::BindingStripWidth => {
                StoreAction::SetBindingStripWidth(sanitize::parse_non_negative(text))
            }
        })
    }
}

/// Events emitted by the settings panel
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    /// Apply a change to the store
    Apply(StoreAction),
    /// Close the panel
    Closed,
}

/// Settings panel state
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    selected: usize,
    editing: Option<String>,
    error: Option<String>,
}

impl SettingsPanel {
    /// Creates a panel with the first setting selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the panel on a specific setting.
    #[must_use]
    pub fn focused_on(item: SettingItem) -> Self {
        Self {
            selected: SettingItem::all().iter().position(|s| *s == item).unwrap_or(0),
            ..Self::default()
        }
    }

    /// Setting under the cursor.
    #[must_use]
    pub fn selected_item(&self) -> SettingItem {
        SettingItem::all()[self.selected.min(SettingItem::all().len() - 1)]
    }

    /// Whether a value is being edited.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn handle_edit_input(&mut self, key: KeyEvent) -> Option<SettingsEvent> {
        let item = self.selected_item();
        let buffer = self.editing.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.editing = None;
                self.error = None;
            }
            KeyCode::Enter => match item.parse(buffer) {
                Ok(action) => {
                    self.editing = None;
                    self.error = None;
                    return Some(SettingsEvent::Apply(action));
                }
                Err(e) => self.error = Some(e),
            },
            KeyCode::Backspace => {
                buffer.pop();
                self.error = None;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
                self.error = None;
            }
            _ => {}
        }
        None
    }
}

impl ContextualComponent for SettingsPanel {
    type Context = QuiltStore;
    type Event = SettingsEvent;

    fn handle_input(&mut self, key: KeyEvent, store: &QuiltStore) -> Option<Self::Event> {
        if self.is_editing() {
            return self.handle_edit_input(key);
        }

        let count = SettingItem::all().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 's') => return Some(SettingsEvent::Closed),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1) % count,
            KeyCode::Char('b') => return Some(SettingsEvent::Apply(StoreAction::BuildGrid)),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let item = self.selected_item();
                if item.is_toggle() {
                    return item.parse("").ok().map(SettingsEvent::Apply);
                }
                self.editing = Some(item.current_value(store));
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, store: &QuiltStore) {
        let area = centered_rect(70, 80, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(" Quilt Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Settings list
                Constraint::Length(3), // Editor
                Constraint::Length(1), // Help text
            ])
            .split(inner);

        let mut items: Vec<ListItem> = Vec::new();
        let mut current_group: Option<SettingGroup> = None;
        for (index, setting) in SettingItem::all().iter().enumerate() {
            let group = setting.group();
            if current_group != Some(group) {
                if current_group.is_some() {
                    items.push(ListItem::new(Line::from("")));
                }
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("── {} ──", group.display_name()),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                ))));
                current_group = Some(group);
            }

            let selected = index == self.selected;
            let style = if selected {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let marker = if selected { "▶ " } else { "  " };
            let value = setting.current_value(store);
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme.primary)),
                Span::styled(setting.display_name(), style),
                Span::styled(": ", Style::default().fg(theme.text_muted)),
                Span::styled(value.clone(), Style::default().fg(theme.success)),
            ];
            if let Ok(color) = RgbColor::from_hex(&value) {
                if value.starts_with('#') {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        "██",
                        Style::default().fg(color.to_ratatui_color()),
                    ));
                }
            }
            items.push(ListItem::new(Line::from(spans)));
        }
        f.render_widget(List::new(items), chunks[0]);

        if let Some(buffer) = &self.editing {
            let (title, style) = match &self.error {
                Some(e) => (format!(" {e} "), Style::default().fg(theme.error)),
                None => (
                    format!(" {} ", self.selected_item().display_name()),
                    Style::default().fg(theme.accent),
                ),
            };
            let editor = Paragraph::new(format!("{buffer}█"))
                .style(Style::default().fg(theme.text))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(style),
                );
            f.render_widget(editor, chunks[1]);
            f.render_widget(
                help_line(theme, &[("Enter", "Apply"), ("Esc", "Cancel edit")]),
                chunks[2],
            );
        } else {
            f.render_widget(
                help_line(
                    theme,
                    &[
                        ("↑↓", "Select"),
                        ("Enter", "Edit/Toggle"),
                        ("b", "Build grid"),
                        ("Esc", "Close"),
                    ],
                ),
                chunks[2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut SettingsPanel, store: &QuiltStore, text: &str) {
        for c in text.chars() {
            panel.handle_input(key(KeyCode::Char(c)), store);
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(SettingItem::Rows.parse("0"), Ok(StoreAction::SetRows(1)));
        assert_eq!(
            SettingItem::BlockWidth.parse("12in"),
            Ok(StoreAction::SetBlockWidth(12.0))
        );
        assert_eq!(
            SettingItem::BorderWidth.parse("-3"),
            Ok(StoreAction::SetBorderWidth(0.0))
        );
        assert_eq!(SettingItem::Wof.parse(""), Ok(StoreAction::SetWof(42.0)));
        assert!(SettingItem::FabricRepeat.parse("0").is_err());
        assert!(SettingItem::BorderColor.parse("blue").is_err());
        assert_eq!(
            SettingItem::BorderColor.parse("#ABC"),
            Ok(StoreAction::SetBorderColor("#aabbcc".to_string()))
        );
    }

    #[test]
    fn test_edit_rows() {
        let store = QuiltStore::default();
        let mut panel = SettingsPanel::new();
        assert_eq!(panel.selected_item(), SettingItem::Rows);

        panel.handle_input(key(KeyCode::Enter), &store);
        assert!(panel.is_editing());
        panel.handle_input(key(KeyCode::Backspace), &store);
        type_text(&mut panel, &store, "7");
        assert_eq!(
            panel.handle_input(key(KeyCode::Enter), &store),
            Some(SettingsEvent::Apply(StoreAction::SetRows(7)))
        );
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_edit_border_width() {
        let store = QuiltStore::default();
        let mut panel = SettingsPanel::focused_on(SettingItem::BorderWidth);

        panel.handle_input(key(KeyCode::Enter), &store);
        for _ in 0..8 {
            panel.handle_input(key(KeyCode::Backspace), &store);
        }
        type_text(&mut panel, &store, "3in");
        assert_eq!(
            panel.handle_input(key(KeyCode::Enter), &store),
            Some(SettingsEvent::Apply(StoreAction::SetBorderWidth(3.0)))
        );
        assert_eq!(panel.selected_item(), SettingItem::BorderWidth);
    }

    #[test]
    fn test_toggle_emits_immediately() {
        let store = QuiltStore::default();
        let mut panel = SettingsPanel::focused_on(SettingItem::Sashing);
        assert_eq!(
            panel.handle_input(key(KeyCode::Enter), &store),
            Some(SettingsEvent::Apply(StoreAction::ToggleSashing))
        );
    }

    #[test]
    fn test_bad_color_keeps_editing() {
        let store = QuiltStore::default();
        let mut panel = SettingsPanel::focused_on(SettingItem::SashingColor);
        panel.handle_input(key(KeyCode::Enter), &store);
        type_text(&mut panel, &store, "zz");
        assert_eq!(panel.handle_input(key(KeyCode::Enter), &store), None);
        assert!(panel.is_editing());
        assert!(panel.error.is_some());

        panel.handle_input(key(KeyCode::Esc), &store);
        assert!(!panel.is_editing());
        assert_eq!(
            panel.handle_input(key(KeyCode::Esc), &store),
            Some(SettingsEvent::Closed)
        );
    }

    #[test]
    fn test_selection_wraps() {
        let store = QuiltStore::default();
        let mut panel = SettingsPanel::new();
        panel.handle_input(key(KeyCode::Up), &store);
        assert_eq!(panel.selected_item(), SettingItem::BindingStripWidth);
        panel.handle_input(key(KeyCode::Down), &store);
        assert_eq!(panel.selected_item(), SettingItem::Rows);
    }
}

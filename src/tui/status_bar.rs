//! Status bar widget for displaying status messages, the paint brush and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::RgbColor;
use crate::shortcuts::{Action, ShortcutRegistry};

use super::{AppState, Theme};

/// Shortcuts advertised on the bottom line.
const HINT_ACTIONS: [(Action, &str); 7] = [
    (Action::PaintCell, "Paint"),
    (Action::StartRectangleSelect, "Rect"),
    (Action::OpenColorPicker, "Color"),
    (Action::OpenSettings, "Settings"),
    (Action::OpenCalculator, "Yardage"),
    (Action::Save, "Save"),
    (Action::ToggleHelp, "Help"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.as_str()),
            ]));
        } else {
            lines.push(Line::from(state.status_message.as_str()));
        }

        lines.push(Self::brush_line(state, theme));
        lines.push(Self::hints_line(theme));

        let status = Paragraph::new(lines)
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(status, area);
    }

    /// Brush, fabric state and cursor position
    fn brush_line<'a>(state: &'a AppState, theme: &Theme) -> Line<'a> {
        let store = &state.store;
        let label = Style::default().fg(theme.primary);
        let swatch = RgbColor::from_hex(store.active_color())
            .map_or(theme.text, |c| c.to_ratatui_color());

        let mode = if store.fabric_mode() && store.fabric().source().is_some() {
            Span::styled("Fabric", Style::default().fg(theme.accent))
        } else {
            Span::styled("Color", Style::default().fg(theme.text))
        };
        let fabric = match (store.fabric().source(), store.fabric().is_available()) {
            (None, _) => Span::styled("none", Style::default().fg(theme.text_muted)),
            (Some(_), false) => Span::styled("loading…", Style::default().fg(theme.warning)),
            (Some(_), true) => Span::styled(
                format!("ready ({}\" repeat)", store.fabric_repeat_inches()),
                Style::default().fg(theme.success),
            ),
        };

        let (row, col) = state.cursor;
        let mut spans = vec![
            Span::styled("Brush: ", label),
            Span::styled("██", Style::default().fg(swatch)),
            Span::raw(format!(" {}  ", store.active_color())),
            Span::styled("Mode: ", label),
            mode,
            Span::raw("  "),
            Span::styled("Fabric: ", label),
            fabric,
            Span::raw("  "),
            Span::styled("Cell: ", label),
            Span::raw(format!(
                "r{row} c{col} ({})",
                store.cell_type(row, col).label()
            )),
        ];
        if let Some(selection) = state.selection {
            let (r0, r1, c0, c1) = selection.bounds();
            spans.push(Span::styled(
                format!("  Selecting {}x{}", r1 - r0 + 1, c1 - c0 + 1),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    /// Key hints built from the shortcut registry
    fn hints_line(theme: &Theme) -> Line<'static> {
        let registry = ShortcutRegistry::new();
        let entries = registry.help_entries("main");
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (action, label) in HINT_ACTIONS {
            let Some((_, keys, _)) = entries.iter().find(|(_, _, d)| *d == action.description())
            else {
                continue;
            };
            let key = keys.split(" / ").next().unwrap_or_default().to_string();
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_line_uses_registry_keys() {
        let line = StatusBar::hints_line(&Theme::dark()).to_string();
        assert!(line.contains("Space Paint"));
        assert!(line.contains("Ctrl+s Save"));
        assert!(line.contains("? Help"));
    }
}

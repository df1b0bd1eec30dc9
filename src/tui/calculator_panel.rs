//! Yardage and strip calculator panel.
//!
//! Read-only view over the store; the inputs it uses (width of fabric,
//! seam allowance, strip widths) are edited in the settings panel.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::store::QuiltStore;
use crate::tui::component::{centered_rect, ContextualComponent};
use crate::tui::prompt::help_line;
use crate::tui::Theme;

/// Events emitted by the calculator panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorEvent {
    /// Close the panel
    Closed,
    /// Jump to the settings panel to change the inputs
    EditInputs,
}

/// Calculator panel
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorPanel;

impl CalculatorPanel {
    /// Text lines of the two reports, in display order.
    #[must_use]
    pub fn report_lines(store: &QuiltStore) -> (Vec<String>, Vec<String>) {
        let inputs = store.calculator();
        let mut fabric = vec![
            format!("Quilt Size: {}", store.quilt_size()),
            format!(
                "WOF {}\"  Seam {}\"  Sash strip {}\"  Binding strip {}\"",
                inputs.wof, inputs.seam, inputs.sash_strip_width, inputs.binding_strip_width
            ),
            String::new(),
        ];
        fabric.extend(store.fabric_breakdown().to_string().lines().map(String::from));
        let strips = store
            .strip_breakdown()
            .to_string()
            .lines()
            .map(String::from)
            .collect();
        (fabric, strips)
    }
}

impl ContextualComponent for CalculatorPanel {
    type Context = QuiltStore;
    type Event = CalculatorEvent;

    fn handle_input(&mut self, key: KeyEvent, _store: &QuiltStore) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'y') => Some(CalculatorEvent::Closed),
            KeyCode::Char('e' | 's') => Some(CalculatorEvent::EditInputs),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, store: &QuiltStore) {
        let area = centered_rect(70, 70, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(" Fabric Calculator ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);

        let (fabric, strips) = Self::report_lines(store);
        let to_lines = |title: &'static str, body: Vec<String>| {
            let mut lines = vec![
                Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            lines.extend(body.into_iter().map(Line::from));
            lines
        };

        f.render_widget(
            Paragraph::new(to_lines("Yardage", fabric)).style(Style::default().fg(theme.text)),
            columns[0],
        );
        f.render_widget(
            Paragraph::new(to_lines("Strips", strips)).style(Style::default().fg(theme.text)),
            columns[1],
        );
        f.render_widget(
            help_line(theme, &[("e", "Edit inputs"), ("Esc", "Close")]),
            rows[1],
        );
    }
}

//! Help overlay showing all keyboard shortcuts organized by category.
//!
//! The content is generated from the [`ShortcutRegistry`], so the overlay
//! never disagrees with the bindings the editor actually uses.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::shortcuts::{ActionCategory, ShortcutRegistry};
use crate::tui::component::Component;
use crate::tui::Theme;

/// Width of the key column.
const KEY_COLUMN: usize = 22;

/// Events emitted by the help overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOverlayEvent {
    /// The overlay should close
    Closed,
}

/// Scrollable shortcut reference.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    entries: Vec<(ActionCategory, String, &'static str)>,
}

impl HelpOverlay {
    /// Creates the overlay for the main editor context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            entries: ShortcutRegistry::new().help_entries("main"),
        }
    }

    fn total_lines(&self) -> usize {
        self.content(&Theme::dark()).len()
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines() {
            self.scroll_offset += 1;
        }
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self, visible_height: usize) {
        self.scroll_offset =
            (self.scroll_offset + visible_height).min(self.total_lines().saturating_sub(1));
    }

    /// Scroll up by a page.
    pub const fn page_up(&mut self, visible_height: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(visible_height);
    }

    fn content(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Quilt Planner",
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Mouse: click to paint a cell, drag to paint a rectangle",
                Style::default().fg(theme.text_muted),
            )),
        ];

        let mut current = None;
        for (category, keys, description) in &self.entries {
            if current != Some(*category) {
                current = Some(*category);
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    category.title(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {keys:<KEY_COLUMN$}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*description, Style::default().fg(theme.text)),
            ]));
        }
        lines
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    type Event = HelpOverlayEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => return Some(HelpOverlayEvent::Closed),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageDown => self.page_down(10),
            KeyCode::PageUp => self.page_up(10),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_offset = self.total_lines().saturating_sub(1),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };
        f.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content = self.content(theme);
        let total = content.len();
        let visible_height = chunks[0].height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .scroll((u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0));
        f.render_widget(paragraph, chunks[0]);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);
        f.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }
}

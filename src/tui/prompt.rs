//! Small modal prompts: path entry and the unsaved-changes confirmation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

use crate::services::LayoutService;
use crate::tui::component::{centered_rect, Component};
use crate::tui::Theme;

/// What the entered path is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePromptMode {
    /// Write the layout to a new file
    SaveAs,
    /// Replace the quilt with a layout file
    Import,
    /// Load a fabric image
    Fabric,
}

impl FilePromptMode {
    const fn title(self) -> &'static str {
        match self {
            Self::SaveAs => "Save Layout As",
            Self::Import => "Import Layout",
            Self::Fabric => "Load Fabric Image",
        }
    }

    const fn hint(self) -> &'static str {
        match self {
            Self::SaveAs => "Path to write; .json is added when missing",
            Self::Import => "Existing layout file (.json)",
            Self::Fabric => "Image file; strokes paint fabric once it loads",
        }
    }

    const fn must_exist(self) -> bool {
        matches!(self, Self::Import | Self::Fabric)
    }
}

/// Events emitted by the path prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePromptEvent {
    /// User confirmed a path
    Confirmed(FilePromptMode, PathBuf),
    /// User cancelled the operation
    Cancelled,
}

/// Single-line path entry dialog
#[derive(Debug, Clone)]
pub struct FilePrompt {
    mode: FilePromptMode,
    input: String,
    error: Option<String>,
}

impl FilePrompt {
    /// Creates a prompt with an optional starting value.
    #[must_use]
    pub fn new(mode: FilePromptMode, initial: Option<String>) -> Self {
        Self {
            mode,
            input: initial.unwrap_or_default(),
            error: None,
        }
    }

    /// What the prompt was opened for.
    #[must_use]
    pub const fn mode(&self) -> FilePromptMode {
        self.mode
    }

    fn validate(&self) -> Result<PathBuf, String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return Err("Path cannot be empty".to_string());
        }
        let path = PathBuf::from(trimmed);
        if self.mode.must_exist() && !path.is_file() {
            return Err(format!("File not found: {}", path.display()));
        }
        Ok(match self.mode {
            FilePromptMode::SaveAs => LayoutService::with_json_extension(&path),
            FilePromptMode::Import | FilePromptMode::Fabric => path,
        })
    }
}

impl Component for FilePrompt {
    type Event = FilePromptEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                self.error = None;
            }
            KeyCode::Char('u') => {
                self.input.clear();
                self.error = None;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Enter => match self.validate() {
                Ok(path) => return Some(FilePromptEvent::Confirmed(self.mode, path)),
                Err(e) => self.error = Some(e),
            },
            KeyCode::Esc => return Some(FilePromptEvent::Cancelled),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, dialog_area);
        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, dialog_area);

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Input field
                Constraint::Length(3), // Hint
                Constraint::Min(2),    // Error message (if any)
                Constraint::Length(2), // Help text
            ])
            .split(dialog_area);

        let title = Paragraph::new(self.mode.title())
            .style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(title, chunks[0]);

        let input = Paragraph::new(format!("{}█", self.input))
            .style(Style::default().fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Path ")
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(input, chunks[1]);

        let hint = Paragraph::new(self.mode.hint())
            .style(Style::default().fg(theme.text_muted))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(hint, chunks[2]);

        if let Some(ref error) = self.error {
            let error_widget = Paragraph::new(error.as_str())
                .style(Style::default().fg(theme.error))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Error ")
                        .style(Style::default().bg(theme.background)),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(error_widget, chunks[3]);
        }

        frame.render_widget(
            help_line(
                theme,
                &[("Enter", "Confirm"), ("Ctrl+U", "Clear"), ("Esc", "Cancel")],
            ),
            chunks[4],
        );
    }
}

/// Events emitted by the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedPromptEvent {
    /// Save, then quit
    SaveAndQuit,
    /// Quit and lose the changes
    Discard,
    /// Keep editing
    Cancelled,
}

/// Confirmation shown when quitting with unsaved changes
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsavedPrompt;

impl Component for UnsavedPrompt {
    type Event = UnsavedPromptEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char('s' | 'S' | 'y' | 'Y') => Some(UnsavedPromptEvent::SaveAndQuit),
            KeyCode::Char('q' | 'Q' | 'n' | 'N') => Some(UnsavedPromptEvent::Discard),
            KeyCode::Esc => Some(UnsavedPromptEvent::Cancelled),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, area);

        let text = vec![
            Line::from(""),
            Line::from("The quilt has unsaved changes."),
            Line::from(""),
            Line::from("  [S] Save and quit"),
            Line::from("  [Q] Quit without saving"),
            Line::from("  [Esc] Cancel"),
        ];
        let prompt = Paragraph::new(text).block(
            Block::default()
                .title(" Unsaved Changes ")
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.warning)),
        );
        f.render_widget(prompt, area);
    }
}

/// Bottom hint line with accented key names.
pub fn help_line<'a>(theme: &Theme, items: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans = Vec::new();
    for (i, (key, label)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {label}")));
    }
    Paragraph::new(Line::from(spans)).style(Style::default().fg(theme.text).bg(theme.background))
}

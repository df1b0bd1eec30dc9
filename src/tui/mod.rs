//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the widgets that draw the quilt editor using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod calculator_panel;
pub mod color_picker;
pub mod component;
pub mod fabric_loader;
pub mod handlers;
pub mod help_overlay;
pub mod prompt;
pub mod quilt_view;
pub mod settings_panel;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::logging::{default_log_file, init_logging, LogTarget};
use crate::models::{DragSelection, RgbColor};
use crate::services::LayoutService;
use crate::store::{QuiltStore, StoreAction};

pub use calculator_panel::CalculatorPanel;
pub use color_picker::ColorPicker;
pub use component::{Component, ContextualComponent};
pub use fabric_loader::{FabricLoader, LoadOutcome};
pub use help_overlay::HelpOverlay;
pub use prompt::{FilePrompt, FilePromptMode, UnsavedPrompt};
pub use quilt_view::QuiltView;
pub use settings_panel::SettingsPanel;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Width of the palette column next to the grid.
const SIDE_PANEL_WIDTH: u16 = 30;

/// Active component - holds the currently open popup
///
/// Only one component can be active at a time.
#[derive(Debug)]
pub enum ActiveComponent {
    /// Paint color picker
    ColorPicker(ColorPicker),
    /// Quilt settings
    Settings(SettingsPanel),
    /// Yardage calculator
    Calculator(CalculatorPanel),
    /// Shortcut reference
    Help(HelpOverlay),
    /// Path entry for save-as, import and fabric
    FilePrompt(FilePrompt),
    /// Quit confirmation with unsaved changes
    UnsavedPrompt(UnsavedPrompt),
}

/// Application state - single source of truth for the editor
///
/// Widgets read from this state immutably. Only event handlers modify it,
/// and quilt changes always go through [`AppState::dispatch`].
pub struct AppState {
    // Core data
    /// Quilt state shared with the CLI and web API
    pub store: QuiltStore,
    /// Path the layout was loaded from / last saved to
    pub source_path: Option<PathBuf>,
    /// Application configuration
    pub config: Config,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Cell under the keyboard cursor `(row, col)`
    pub cursor: (usize, usize),
    /// Keyboard rectangle selection anchored with `v`
    pub selection: Option<DragSelection>,
    /// Mouse drag in progress
    pub mouse_drag: Option<DragSelection>,
    /// Currently active popup (if any)
    pub active_component: Option<ActiveComponent>,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,
    /// Inner area of the grid from the last layout pass
    pub grid_area: Rect,

    // Background work
    /// Fabric image loader
    pub fabric_loader: FabricLoader,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the editor state around a store.
    ///
    /// The store's dark-mode flag is aligned with the configured theme so
    /// that toggling starts from what the user sees.
    #[must_use]
    pub fn new(mut store: QuiltStore, config: Config, source_path: Option<PathBuf>) -> Self {
        let initial = Theme::from_mode(config.ui.theme_mode);
        if initial.is_dark() != store.dark_mode() {
            store.dispatch(StoreAction::ToggleDarkMode);
        }
        let theme = Theme::for_dark_mode(store.dark_mode());

        Self {
            store,
            source_path,
            config,
            theme,
            cursor: (0, 0),
            selection: None,
            mouse_drag: None,
            active_component: None,
            status_message: "Press ? for help".to_string(),
            error_message: None,
            grid_area: Rect::default(),
            fabric_loader: FabricLoader::new(),
            should_quit: false,
        }
    }

    /// Applies a store action and keeps the UI state consistent with it.
    ///
    /// Returns true when the grid was rebuilt.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        let rebuilt = self.store.dispatch(action);
        if rebuilt {
            self.selection = None;
            self.mouse_drag = None;
            self.clamp_cursor();
        }
        self.theme = Theme::for_dark_mode(self.store.dark_mode());
        rebuilt
    }

    /// Keeps the cursor inside the grid.
    pub fn clamp_cursor(&mut self) {
        let rows = self.store.paint_layer().rows();
        let cols = self.store.paint_layer().cols();
        self.cursor.0 = self.cursor.0.min(rows.saturating_sub(1));
        self.cursor.1 = self.cursor.1.min(cols.saturating_sub(1));
    }

    /// Moves the cursor by a delta, panning when it leaves the visible window.
    pub fn move_cursor(&mut self, d_row: i64, d_col: i64) {
        let rows = self.store.paint_layer().rows() as i64;
        let cols = self.store.paint_layer().cols() as i64;
        let row = (self.cursor.0 as i64 + d_row).clamp(0, (rows - 1).max(0));
        let col = (self.cursor.1 as i64 + d_col).clamp(0, (cols - 1).max(0));
        self.set_cursor(row as usize, col as usize);
    }

    /// Places the cursor and scrolls it into view.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
        self.clamp_cursor();
        if let Some(selection) = self.selection.as_mut() {
            selection.update(self.cursor.0 as i64, self.cursor.1 as i64);
        }
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let viewport = *self.store.viewport();
        let (span_rows, span_cols) =
            quilt_view::visible_span(self.grid_area, viewport.zoom_percent);
        let d_row = scroll_delta(self.cursor.0 as i64, viewport.pan_row, span_rows as i64);
        let d_col = scroll_delta(self.cursor.1 as i64, viewport.pan_col, span_cols as i64);
        if d_row != 0 || d_col != 0 {
            self.dispatch(StoreAction::Pan { d_row, d_col });
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Open a popup
    pub fn open(&mut self, component: ActiveComponent) {
        self.active_component = Some(component);
    }

    /// Close the currently active component
    pub fn close_component(&mut self) {
        self.active_component = None;
    }

    /// Writes the layout to `path` (or the source path, or the default
    /// export location) and remembers it as the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self, path: Option<PathBuf>) -> Result<PathBuf> {
        let path = path
            .or_else(|| self.source_path.clone())
            .unwrap_or_else(|| LayoutService::default_export_path(&self.config));
        LayoutService::save(&self.store.export_layout(), &path)?;
        self.store.mark_saved();
        self.source_path = Some(path.clone());
        self.set_status(format!("Saved {}", path.display()));
        Ok(path)
    }

    /// Replaces the quilt with a layout file.
    ///
    /// A rejected file leaves the current quilt untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn import(&mut self, path: &Path) -> Result<()> {
        let layout = LayoutService::load(path)?;
        self.dispatch(StoreAction::ImportLayout(Box::new(layout)));
        self.source_path = Some(path.to_path_buf());
        self.set_cursor(0, 0);
        self.set_status(format!(
            "Imported {} ({} x {} cells)",
            path.display(),
            self.store.paint_layer().rows(),
            self.store.paint_layer().cols()
        ));
        Ok(())
    }

    /// Starts loading a fabric image in the background.
    pub fn load_fabric(&mut self, path: PathBuf) {
        self.dispatch(StoreAction::SetFabricSource(path.display().to_string()));
        if let Some(ticket) = self.store.fabric().pending() {
            self.fabric_loader.spawn(ticket, path);
            self.set_status("Loading fabric…");
        }
    }

    /// Applies finished fabric loads.
    pub fn poll_fabric(&mut self) {
        for outcome in self.fabric_loader.poll(&mut self.store) {
            match outcome {
                LoadOutcome::Ready(source) => self.set_status(format!("Fabric ready: {source}")),
                LoadOutcome::Stale => {}
                LoadOutcome::Failed(e) => {
                    self.dispatch(StoreAction::ClearFabric);
                    self.set_error(format!("Failed to load fabric: {e}"));
                }
            }
        }
    }
}

/// Pan needed so that `pos` is inside `[pan, pan + span)`.
fn scroll_delta(pos: i64, pan: i64, span: i64) -> i64 {
    if span <= 0 {
        return 0;
    }
    if pos < pan {
        pos - pan
    } else if pos >= pan + span {
        pos - (pan + span - 1)
    } else {
        0
    }
}

/// Opens the editor, optionally on an existing layout file.
///
/// Logging goes to a file because the terminal is taken over by the UI.
///
/// # Errors
///
/// Returns an error if the configuration or the layout cannot be loaded, or
/// the terminal cannot be set up.
pub fn launch(layout_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    init_logging(&LogTarget::File(default_log_file()?), verbose)?;
    let config = Config::load().context("Failed to load configuration")?;

    let mut store = QuiltStore::with_config(&config);
    if let Some(path) = layout_path.as_deref().filter(|p| p.exists()) {
        let layout = LayoutService::load(path)?;
        store.dispatch(StoreAction::ImportLayout(Box::new(layout)));
        info!(path = %path.display(), "Opened layout");
    }

    let mut state = AppState::new(store, config, layout_path);
    let mut terminal = setup_terminal()?;
    let result = run_tui(&mut state, &mut terminal);
    restore_terminal(terminal)?;
    result
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        state.grid_area = quilt_view::grid_inner(main_chunks(screen)[1]);

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse),
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }

        state.poll_fabric();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Splits the screen into title bar, editor and status bar, then the editor
/// into grid and side panel: `[title, grid, side, status]`.
fn main_chunks(area: Rect) -> [Rect; 4] {
    let rows = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(6),    // Grid and side panel
            Constraint::Length(5), // Status bar
        ])
        .split(area);
    let columns = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(rows[1]);
    [rows[0], columns[0], columns[1], rows[2]]
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let [title, grid, side, status] = main_chunks(f.area());
    render_title_bar(f, title, state);
    QuiltView::render(f, grid, state);
    render_side_panel(f, side, state);
    StatusBar::render(f, status, state, &state.theme);

    if let Some(component) = &state.active_component {
        render_popup(f, component, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with file name and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.store.is_dirty() { " *" } else { "" };
    let name = state
        .source_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "Untitled".to_string(), |n| n.to_string_lossy().into_owned());
    let title = format!(
        " Quilt Planner - {name}{dirty_indicator}  |  {}",
        state.store.quilt_size()
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );
    f.render_widget(title_widget, area);
}

/// Render the palette, frame colors and yardage total
fn render_side_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let store = &state.store;
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let swatch_line = |label: String, hex: &str| {
        let color = RgbColor::from_hex(hex).map_or(theme.text, |c| c.to_ratatui_color());
        Line::from(vec![
            Span::styled("██ ", Style::default().fg(color)),
            Span::styled(label, Style::default().fg(theme.text)),
        ])
    };

    let mut lines = vec![heading("Saved colors")];
    for (slot, color) in store.saved_colors().slots().iter().enumerate() {
        lines.push(match color {
            Some(hex) => swatch_line(format!("{} {hex}", slot + 1), hex),
            None => Line::from(Span::styled(
                format!("·· {} empty", slot + 1),
                Style::default().fg(theme.text_muted),
            )),
        });
    }

    let cfg = store.config();
    lines.push(Line::from(""));
    lines.push(heading("Frame"));
    lines.push(swatch_line(
        format!("Border {}\"", cfg.border_width),
        &cfg.border_color,
    ));
    if cfg.sashing_border_enabled {
        lines.push(swatch_line(
            format!("Sash border {}\"", cfg.sashing_border_width),
            &cfg.sashing_border_color,
        ));
    }
    if cfg.sashing_enabled {
        lines.push(swatch_line(
            format!("Sashing {}\"", cfg.sashing_width),
            &cfg.sashing_color,
        ));
    }

    let yardage = store.fabric_breakdown();
    lines.push(Line::from(""));
    lines.push(heading("Fabric"));
    lines.push(Line::from(format!(
        "Total: {} yd",
        crate::services::to_mixed_fraction(yardage.total)
    )));
    lines.push(Line::from(format!(
        "Painted: {} cells",
        store.paint_layer().painted_count()
    )));

    let panel = Paragraph::new(lines)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .block(
            Block::default()
                .title(" Palette ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
    f.render_widget(panel, area);
}

/// Render active popup
fn render_popup(f: &mut Frame, component: &ActiveComponent, state: &AppState) {
    let area = f.area();
    let theme = &state.theme;
    match component {
        ActiveComponent::ColorPicker(picker) => {
            picker.render(f, area, theme, state.store.saved_colors());
        }
        ActiveComponent::Settings(panel) => panel.render(f, area, theme, &state.store),
        ActiveComponent::Calculator(panel) => panel.render(f, area, theme, &state.store),
        ActiveComponent::Help(overlay) => overlay.render(f, area, theme),
        ActiveComponent::FilePrompt(prompt) => prompt.render(f, area, theme),
        ActiveComponent::UnsavedPrompt(prompt) => prompt.render(f, area, theme),
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = component::centered_rect(70, 40, f.area());
    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(2), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    f.render_widget(
        prompt::help_line(theme, &[("Enter/Esc", "Dismiss")]),
        chunks[2],
    );
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::{KeyCode, KeyEventKind};

    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_component.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}

/// Logs a failed background or file operation and shows it to the user.
pub(crate) fn report_error(state: &mut AppState, context: &str, error: &anyhow::Error) {
    warn!(error = %format!("{error:#}"), "{context}");
    state.set_error(format!("{context}: {error:#}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state() -> AppState {
        let mut state = AppState::new(QuiltStore::default(), Config::default(), None);
        state.grid_area = Rect::new(1, 1, 40, 20);
        state
    }

    #[test]
    fn test_scroll_delta() {
        assert_eq!(scroll_delta(5, 0, 10), 0);
        assert_eq!(scroll_delta(12, 0, 10), 3);
        assert_eq!(scroll_delta(2, 4, 10), -2);
        assert_eq!(scroll_delta(2, 4, 0), 0);
    }

    #[test]
    fn test_cursor_pans_viewport() {
        let mut state = state();
        // 20 cols visible at 100 % in a 40-wide area
        state.move_cursor(0, 25);
        assert_eq!(state.cursor, (0, 25));
        assert_eq!(state.store.viewport().pan_col, 6);

        state.move_cursor(-5, -100);
        assert_eq!(state.cursor, (0, 0));
        assert_eq!(state.store.viewport().pan_col, 0);
    }

    #[test]
    fn test_rebuild_clamps_cursor_and_drops_selection() {
        let mut state = state();
        state.set_cursor(60, 50);
        state.selection = Some(DragSelection::new(1, 1));
        assert!(state.dispatch(StoreAction::SetRows(1)));
        assert!(state.selection.is_none());
        assert!(state.cursor.0 < state.store.paint_layer().rows());
    }

    #[test]
    fn test_theme_follows_store_dark_mode() {
        let mut state = state();
        let before = state.theme.is_dark();
        state.dispatch(StoreAction::ToggleDarkMode);
        assert_eq!(state.theme.is_dark(), !before);
        assert_eq!(state.store.dark_mode(), state.theme.is_dark());
    }

    #[test]
    fn test_save_and_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quilt.json");

        let mut state = state();
        state.dispatch(StoreAction::PaintCell {
            row: 3,
            col: 4,
            value: "#123456".into(),
        });
        assert!(state.store.is_dirty());
        state.save(Some(path.clone())).unwrap();
        assert!(!state.store.is_dirty());
        assert_eq!(state.source_path.as_deref(), Some(path.as_path()));

        let mut other = AppState::new(QuiltStore::default(), Config::default(), None);
        other.import(&path).unwrap();
        assert_eq!(other.store.paint_layer().get(3, 4), Some("#123456"));
    }

    #[test]
    fn test_rejected_import_keeps_quilt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"version\": 99}").unwrap();

        let mut state = state();
        state.dispatch(StoreAction::SetRows(3));
        assert!(state.import(&path).is_err());
        assert_eq!(state.store.config().rows, 3);
    }
}

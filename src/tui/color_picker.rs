//! Color picker dialog for the active paint color.
//!
//! Three sections share one dialog:
//! - RGB channels for fine-tuning
//! - Preset swatches
//! - The six saved color slots (save, recall, clear)

// Allow intentional type casts for slider math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::models::{RgbColor, SavedColors, PRESET_COLORS, SAVED_SLOTS};
use crate::tui::component::{centered_rect, ContextualComponent};
use crate::tui::Theme;

/// RGB channel being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbChannel {
    /// Red color channel
    Red,
    /// Green color channel
    Green,
    /// Blue color channel
    Blue,
}

/// Section of the picker that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerFocus {
    /// RGB sliders
    #[default]
    Channels,
    /// Preset swatches
    Presets,
    /// Saved slots
    Saved,
}

/// Events emitted by the color picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorPickerEvent {
    /// Use this color (`#rrggbb`) for painting
    Apply(String),
    /// Store this color in a saved slot
    SaveSlot {
        /// Slot index
        slot: usize,
        /// Color to store
        color: String,
    },
    /// Empty a saved slot
    ClearSlot(usize),
    /// Close without changes
    Cancelled,
}

/// Color picker component state
#[derive(Debug, Clone)]
pub struct ColorPicker {
    r: u8,
    g: u8,
    b: u8,
    active_channel: RgbChannel,
    focus: PickerFocus,
    preset_index: usize,
    slot_index: usize,
}

impl ColorPicker {
    /// Create a picker starting from the given color (white if it does not parse)
    #[must_use]
    pub fn with_color(hex: &str) -> Self {
        let color = RgbColor::from_hex(hex).unwrap_or_default();
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            active_channel: RgbChannel::Red,
            focus: PickerFocus::Channels,
            preset_index: 0,
            slot_index: 0,
        }
    }

    /// Get the current color
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        RgbColor::new(self.r, self.g, self.b)
    }

    /// Section with focus
    #[must_use]
    pub const fn focus(&self) -> PickerFocus {
        self.focus
    }

    fn set_color(&mut self, color: RgbColor) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }

    /// Switch to next RGB channel (Red -> Green -> Blue -> Red)
    pub const fn next_channel(&mut self) {
        self.active_channel = match self.active_channel {
            RgbChannel::Red => RgbChannel::Green,
            RgbChannel::Green => RgbChannel::Blue,
            RgbChannel::Blue => RgbChannel::Red,
        };
    }

    /// Switch to previous RGB channel (Red -> Blue -> Green -> Red)
    pub const fn previous_channel(&mut self) {
        self.active_channel = match self.active_channel {
            RgbChannel::Red => RgbChannel::Blue,
            RgbChannel::Green => RgbChannel::Red,
            RgbChannel::Blue => RgbChannel::Green,
        };
    }

    /// Increase the active channel value
    pub const fn increase_value(&mut self, amount: u8) {
        match self.active_channel {
            RgbChannel::Red => self.r = self.r.saturating_add(amount),
            RgbChannel::Green => self.g = self.g.saturating_add(amount),
            RgbChannel::Blue => self.b = self.b.saturating_add(amount),
        }
    }

    /// Decrease the active channel value
    pub const fn decrease_value(&mut self, amount: u8) {
        match self.active_channel {
            RgbChannel::Red => self.r = self.r.saturating_sub(amount),
            RgbChannel::Green => self.g = self.g.saturating_sub(amount),
            RgbChannel::Blue => self.b = self.b.saturating_sub(amount),
        }
    }

    const fn next_focus(&mut self) {
        self.focus = match self.focus {
            PickerFocus::Channels => PickerFocus::Presets,
            PickerFocus::Presets => PickerFocus::Saved,
            PickerFocus::Saved => PickerFocus::Channels,
        };
    }

    const fn previous_focus(&mut self) {
        self.focus = match self.focus {
            PickerFocus::Channels => PickerFocus::Saved,
            PickerFocus::Presets => PickerFocus::Channels,
            PickerFocus::Saved => PickerFocus::Presets,
        };
    }

    fn move_preset(&mut self, delta: isize) {
        self.preset_index = self
            .preset_index
            .saturating_add_signed(delta)
            .min(PRESET_COLORS.len() - 1);
        if let Ok(color) = RgbColor::from_hex(PRESET_COLORS[self.preset_index]) {
            self.set_color(color);
        }
    }

    fn move_slot(&mut self, delta: isize) {
        self.slot_index = self
            .slot_index
            .saturating_add_signed(delta)
            .min(SAVED_SLOTS - 1);
    }
}

impl ContextualComponent for ColorPicker {
    type Context = SavedColors;
    type Event = ColorPickerEvent;

    fn handle_input(&mut self, key: KeyEvent, saved: &SavedColors) -> Option<Self::Event> {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            16
        } else {
            1
        };

        match key.code {
            KeyCode::Esc => return Some(ColorPickerEvent::Cancelled),
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.previous_focus(),
            KeyCode::Enter => {
                if self.focus == PickerFocus::Saved {
                    match saved.get(self.slot_index).map(RgbColor::from_hex) {
                        Some(Ok(color)) => self.set_color(color),
                        // Enter on an empty slot does nothing.
                        _ => return None,
                    }
                }
                return Some(ColorPickerEvent::Apply(self.color().to_hex()));
            }
            KeyCode::Char('s') if self.focus == PickerFocus::Saved => {
                return Some(ColorPickerEvent::SaveSlot {
                    slot: self.slot_index,
                    color: self.color().to_hex(),
                });
            }
            KeyCode::Char('x') if self.focus == PickerFocus::Saved => {
                return Some(ColorPickerEvent::ClearSlot(self.slot_index));
            }
            KeyCode::Up | KeyCode::Char('k') if self.focus == PickerFocus::Channels => {
                self.previous_channel();
            }
            KeyCode::Down | KeyCode::Char('j') if self.focus == PickerFocus::Channels => {
                self.next_channel();
            }
            KeyCode::Right | KeyCode::Char('l') => match self.focus {
                PickerFocus::Channels => self.increase_value(step),
                PickerFocus::Presets => self.move_preset(1),
                PickerFocus::Saved => self.move_slot(1),
            },
            KeyCode::Left | KeyCode::Char('h') => match self.focus {
                PickerFocus::Channels => self.decrease_value(step),
                PickerFocus::Presets => self.move_preset(-1),
                PickerFocus::Saved => self.move_slot(-1),
            },
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, saved: &SavedColors) {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(" Paint Color ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // 0: Channels label
                Constraint::Length(3), // 1: Sliders
                Constraint::Length(1), // 2: Spacer
                Constraint::Length(1), // 3: Presets label
                Constraint::Length(1), // 4: Presets
                Constraint::Length(1), // 5: Spacer
                Constraint::Length(1), // 6: Saved label
                Constraint::Length(1), // 7: Saved slots
                Constraint::Length(1), // 8: Spacer
                Constraint::Length(3), // 9: Preview
                Constraint::Min(0),    // 10: Flexible spacer
                Constraint::Length(1), // 11: Instructions
            ])
            .split(inner);

        let label_style = |focus: PickerFocus| {
            if self.focus == focus {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            }
        };

        f.render_widget(
            Paragraph::new("RGB").style(label_style(PickerFocus::Channels)),
            chunks[0],
        );
        self.render_sliders(f, chunks[1], theme);

        f.render_widget(
            Paragraph::new("Presets").style(label_style(PickerFocus::Presets)),
            chunks[3],
        );
        let presets: Vec<Span> = PRESET_COLORS
            .iter()
            .enumerate()
            .flat_map(|(i, hex)| {
                let color = swatch(hex);
                let marker = if self.focus == PickerFocus::Presets && i == self.preset_index {
                    "▶"
                } else {
                    " "
                };
                [
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled("███ ", Style::default().fg(color)),
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(presets)), chunks[4]);

        f.render_widget(
            Paragraph::new("Saved (s save, x clear)").style(label_style(PickerFocus::Saved)),
            chunks[6],
        );
        let slots: Vec<Span> = saved
            .slots()
            .iter()
            .enumerate()
            .flat_map(|(i, slot)| {
                let marker = if self.focus == PickerFocus::Saved && i == self.slot_index {
                    "▶"
                } else {
                    " "
                };
                let body = match slot {
                    Some(hex) => Span::styled("███ ", Style::default().fg(swatch(hex))),
                    None => Span::styled("··· ", Style::default().fg(theme.text_muted)),
                };
                [
                    Span::styled(format!("{marker}{} ", i + 1), Style::default().fg(theme.text)),
                    body,
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(slots)), chunks[7]);

        let color = self.color();
        let preview = Paragraph::new(color.to_hex())
            .style(
                Style::default()
                    .bg(color.to_ratatui_color())
                    .fg(color.contrast_text().to_ratatui_color()),
            )
            .block(Block::default().borders(Borders::ALL).title(" Preview "));
        f.render_widget(preview, chunks[9]);

        let instructions = Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" Section  "),
            Span::styled("←→", Style::default().fg(theme.accent)),
            Span::raw(" Adjust (Shift ×16)  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" Apply  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" Cancel"),
        ]);
        f.render_widget(
            Paragraph::new(instructions).style(Style::default().fg(theme.text)),
            chunks[11],
        );
    }
}

impl ColorPicker {
    fn render_sliders(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 3])
            .split(area);
        let channels = [
            (RgbChannel::Red, "R", self.r, Color::Red),
            (RgbChannel::Green, "G", self.g, Color::Green),
            (RgbChannel::Blue, "B", self.b, Color::Blue),
        ];
        for (row, (channel, name, value, color)) in rows.iter().zip(channels) {
            let active = self.focus == PickerFocus::Channels && channel == self.active_channel;
            let label_style = if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color).bg(theme.surface))
                .ratio(f64::from(value) / 255.0)
                .label(Span::styled(format!("{name} {value:>3}"), label_style));
            f.render_widget(gauge, *row);
        }
    }
}

fn swatch(hex: &str) -> Color {
    RgbColor::from_hex(hex)
        .unwrap_or_default()
        .to_ratatui_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_with_color() {
        let picker = ColorPicker::with_color("#ffcc00");
        assert_eq!(picker.color(), RgbColor::new(255, 204, 0));
        assert_eq!(ColorPicker::with_color("nope").color(), RgbColor::default());
    }

    #[test]
    fn test_channel_adjust_and_apply() {
        let saved = SavedColors::new();
        let mut picker = ColorPicker::with_color("#000000");
        picker.handle_input(key(KeyCode::Right), &saved);
        picker.handle_input(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT), &saved);
        picker.handle_input(key(KeyCode::Down), &saved);
        picker.handle_input(key(KeyCode::Right), &saved);
        assert_eq!(picker.color(), RgbColor::new(17, 1, 0));
        assert_eq!(
            picker.handle_input(key(KeyCode::Enter), &saved),
            Some(ColorPickerEvent::Apply("#110100".to_string()))
        );
    }

    #[test]
    fn test_presets_update_color() {
        let saved = SavedColors::new();
        let mut picker = ColorPicker::with_color("#123456");
        picker.handle_input(key(KeyCode::Tab), &saved);
        assert_eq!(picker.focus(), PickerFocus::Presets);
        picker.handle_input(key(KeyCode::Right), &saved);
        assert_eq!(picker.color().to_hex(), PRESET_COLORS[1]);
        for _ in 0..20 {
            picker.handle_input(key(KeyCode::Right), &saved);
        }
        assert_eq!(picker.color().to_hex(), PRESET_COLORS[PRESET_COLORS.len() - 1]);
    }

    #[test]
    fn test_saved_slots() {
        let mut saved = SavedColors::new();
        saved.save(1, "#00aa55");
        let mut picker = ColorPicker::with_color("#ff0000");
        picker.handle_input(key(KeyCode::BackTab), &saved);
        assert_eq!(picker.focus(), PickerFocus::Saved);

        // Empty slot 0: Enter is ignored
        assert_eq!(picker.handle_input(key(KeyCode::Enter), &saved), None);
        assert_eq!(
            picker.handle_input(key(KeyCode::Char('s')), &saved),
            Some(ColorPickerEvent::SaveSlot {
                slot: 0,
                color: "#ff0000".to_string()
            })
        );

        picker.handle_input(key(KeyCode::Right), &saved);
        assert_eq!(
            picker.handle_input(key(KeyCode::Enter), &saved),
            Some(ColorPickerEvent::Apply("#00aa55".to_string()))
        );
        assert_eq!(
            picker.handle_input(key(KeyCode::Char('x')), &saved),
            Some(ColorPickerEvent::ClearSlot(1))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut picker = ColorPicker::with_color("#ffffff");
        assert_eq!(
            picker.handle_input(key(KeyCode::Esc), &SavedColors::new()),
            Some(ColorPickerEvent::Cancelled)
        );
    }
}

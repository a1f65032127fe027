//! # Trigger Component
//!
//! The small floating button the overlay collapses into. Clicking its body
//! toggles the panel, clicking `✕` dismisses the overlay, and dragging the
//! body moves it around the terminal.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TriggerState` (position, drag) lives in `TuiState`
//! - `Trigger` is created each frame with the props it shows

use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const TRIGGER_WIDTH: u16 = 20;
pub const TRIGGER_HEIGHT: u16 = 3;

pub const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Events emitted by the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Body clicked without dragging.
    Toggle,
    /// `✕` clicked.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    grab_x: u16,
    grab_y: u16,
    moved: bool,
}

/// Persistent position and drag state.
pub struct TriggerState {
    pub x: u16,
    pub y: u16,
    /// Frame bounds, synced before events are handled.
    pub bounds: Rect,
    drag: Option<Drag>,
}

impl TriggerState {
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            bounds: Rect::new(0, 0, u16::MAX, u16::MAX),
            drag: None,
        }
    }

    /// Where the button is drawn, clamped inside the frame.
    pub fn area(&self) -> Rect {
        let width = TRIGGER_WIDTH.min(self.bounds.width);
        let height = TRIGGER_HEIGHT.min(self.bounds.height);
        let max_x = self.bounds.right().saturating_sub(width);
        let max_y = self.bounds.bottom().saturating_sub(height);
        Rect::new(
            self.x.clamp(self.bounds.x, max_x.max(self.bounds.x)),
            self.y.clamp(self.bounds.y, max_y.max(self.bounds.y)),
            width,
            height,
        )
    }

    fn close_cell(&self) -> Position {
        let area = self.area();
        Position::new(area.right().saturating_sub(3), area.y + 1)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.moved)
    }
}

impl EventHandler for TriggerState {
    type Event = TriggerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TriggerEvent> {
        match *event {
            TuiEvent::MouseDown(col, row) => {
                let area = self.area();
                if !area.contains(Position::new(col, row)) {
                    return None;
                }
                if Position::new(col, row) == self.close_cell() {
                    return Some(TriggerEvent::Close);
                }
                self.drag = Some(Drag {
                    grab_x: col - area.x,
                    grab_y: row - area.y,
                    moved: false,
                });
                None
            }
            TuiEvent::MouseDrag(col, row) => {
                if let Some(drag) = self.drag.as_mut() {
                    self.x = col.saturating_sub(drag.grab_x);
                    self.y = row.saturating_sub(drag.grab_y);
                    drag.moved = true;
                }
                None
            }
            TuiEvent::MouseUp(_, _) => match self.drag.take() {
                Some(drag) if !drag.moved => Some(TriggerEvent::Toggle),
                Some(_) => {
                    // Remember the clamped spot so the next drag starts from what's on screen
                    let area = self.area();
                    self.x = area.x;
                    self.y = area.y;
                    None
                }
                None => None,
            },
            _ => None,
        }
    }
}

/// Transient render wrapper for the trigger button.
pub struct Trigger {
    pub expanded: bool,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl Component for Trigger {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let accent = if self.expanded { Color::Cyan } else { Color::Yellow };
        let icon = if self.loading {
            SPINNER[self.spinner_frame % SPINNER.len()]
        } else {
            "◉"
        };

        let label = format!(" {icon} AI helper");
        let inner_width = area.width.saturating_sub(2) as usize;
        // Label on the left, ✕ pinned two cells from the right border
        let pad = inner_width.saturating_sub(label.chars().count() + 2);
        let line = Line::from(vec![
            Span::styled(label, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled("✕", Style::default().fg(Color::Red)),
            Span::raw(" "),
        ]);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent));

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

//! # Action List Component
//!
//! The expanded panel's first page: a search box over the list of actions.
//! Typing edits the query, Up/Down move the selection, Enter drills into the
//! selected action and Esc collapses the panel. Clicking a row picks that
//! action; clicking `✕` collapses.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ActionListState` lives in `TuiState`
//! - `ActionList` is created each frame with borrowed state

use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding, Paragraph};
use ratatui::Frame;

use crate::catalog::Action;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::trigger::SPINNER;
use crate::tui::components::{panel_close_cell, truncate_to_width};
use crate::tui::event::TuiEvent;

/// Events emitted by the action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionListEvent {
    QueryChanged(String),
    /// Index into the filtered list.
    Select(usize),
    Collapse,
}

/// Persistent state for the action list.
pub struct ActionListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Current query (prop, synced from the session).
    pub query: String,
    /// Number of visible (filtered) actions (prop).
    pub item_count: usize,
    /// Where the panel is drawn (prop), for mouse hit-testing.
    pub area: Rect,
}

/// Border, then the three-row search box.
const LIST_TOP_OFFSET: u16 = 4;

impl Default for ActionListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
            query: String::new(),
            item_count: 0,
            area: Rect::default(),
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    /// Keeps the selection inside the current list.
    pub fn clamp_selection(&mut self) {
        if self.item_count == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.item_count - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn click(&mut self, col: u16, row: u16) -> Option<ActionListEvent> {
        let position = Position::new(col, row);
        if !self.area.contains(position) {
            return None;
        }
        if position == panel_close_cell(self.area) {
            return Some(ActionListEvent::Collapse);
        }

        let list_top = self.area.y + LIST_TOP_OFFSET;
        let list_bottom = self.area.bottom().saturating_sub(1);
        if row < list_top || row >= list_bottom {
            return None;
        }
        let index = (row - list_top) as usize + self.list_state.offset();
        if index >= self.item_count {
            return None;
        }
        self.selected = index;
        self.clamp_selection();
        Some(ActionListEvent::Select(index))
    }
}

impl EventHandler for ActionListState {
    type Event = ActionListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ActionListEvent> {
        match event {
            TuiEvent::Escape => Some(ActionListEvent::Collapse),
            TuiEvent::InputChar(c) => Some(ActionListEvent::QueryChanged(format!("{}{}", self.query, c))),
            TuiEvent::Paste(text) => {
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                if pasted.is_empty() {
                    return None;
                }
                Some(ActionListEvent::QueryChanged(format!("{}{}", self.query, pasted)))
            }
            TuiEvent::Backspace => {
                let mut query = self.query.clone();
                query.pop().map(|_| ActionListEvent::QueryChanged(query))
            }
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.clamp_selection();
                None
            }
            TuiEvent::CursorDown => {
                self.selected = self.selected.saturating_add(1);
                self.clamp_selection();
                None
            }
            TuiEvent::MouseDown(col, row) => self.click(*col, *row),
            TuiEvent::Submit if self.item_count > 0 => {
                self.clamp_selection();
                Some(ActionListEvent::Select(self.selected))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the action list.
pub struct ActionList<'a> {
    state: &'a mut ActionListState,
    /// Already filtered by the session.
    actions: &'a [Action],
    has_any_actions: bool,
    loading: bool,
    spinner_frame: usize,
    status: &'a str,
}

impl<'a> ActionList<'a> {
    pub fn new(
        state: &'a mut ActionListState,
        actions: &'a [Action],
        has_any_actions: bool,
        loading: bool,
        spinner_frame: usize,
        status: &'a str,
    ) -> Self {
        Self {
            state,
            actions,
            has_any_actions,
            loading,
            spinner_frame,
            status,
        }
    }
}

impl Component for ActionList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Popular actions ")
            .title_bottom(Line::from(" Enter Open  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let close = Span::styled(" ✕ ", Style::default().fg(Color::Red));
        block = if self.status.is_empty() {
            block.title(Line::from(close).right_aligned())
        } else {
            let status = Span::raw(format!(" {}", self.status));
            block.title(Line::from(vec![status, close]).right_aligned())
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

        // Search box
        let search_text = if self.state.query.is_empty() {
            Line::from(Span::styled("Search actions...", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.state.query.as_str())
        };
        let search = Paragraph::new(search_text).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(" 🔍 "),
        );
        frame.render_widget(search, search_area);
        let query_width = unicode_width::UnicodeWidthStr::width(self.state.query.as_str()) as u16;
        let cursor_x = (search_area.x + 1 + query_width).min(search_area.right().saturating_sub(2));
        frame.set_cursor_position((cursor_x, search_area.y + 1));

        if self.loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{spinner} Loading actions..."))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            frame.render_widget(loading, list_area);
            return;
        }

        if self.actions.is_empty() {
            let message = if self.has_any_actions {
                format!("No actions match \"{}\"", self.state.query)
            } else {
                "No actions available".to_string()
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, list_area);
            return;
        }

        let name_width = list_area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .actions
            .iter()
            .map(|action| ListItem::new(truncate_to_width(&action.name, name_width)))
            .collect();

        let list = List::new(items)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("› ");

        self.state.item_count = self.actions.len();
        self.state.clamp_selection();
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

//! # Step List Component
//!
//! The expanded panel's second page: the ordered walkthrough for one action.
//! Steps are numbered from 1. Enter (or moving onto a step with Up/Down)
//! makes it active, which is what drives the highlight overlay. Steps and
//! the back hint on the bottom border also respond to clicks.

use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::Step;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::trigger::SPINNER;
use crate::tui::components::{panel_close_cell, truncate_to_width};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepListEvent {
    Activate(usize),
    Back,
    Collapse,
}

/// Rows under the list that show the active step in full.
const DETAIL_HEIGHT: u16 = 3;

pub struct StepListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Number of steps (prop, synced from the session).
    pub item_count: usize,
    /// Where the panel is drawn (prop), for mouse hit-testing.
    pub area: Rect,
}

impl Default for StepListState {
    fn default() -> Self {
        Self::new()
    }
}

impl StepListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
            item_count: 0,
            area: Rect::default(),
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.list_state.select(None);
    }

    fn move_to(&mut self, index: usize) -> Option<StepListEvent> {
        if self.item_count == 0 {
            return None;
        }
        self.selected = index.min(self.item_count - 1);
        self.list_state.select(Some(self.selected));
        Some(StepListEvent::Activate(self.selected))
    }

    fn click(&mut self, col: u16, row: u16) -> Option<StepListEvent> {
        let position = Position::new(col, row);
        if !self.area.contains(position) {
            return None;
        }
        if position == panel_close_cell(self.area) {
            return Some(StepListEvent::Collapse);
        }
        let bottom_border = self.area.bottom().saturating_sub(1);
        if row == bottom_border {
            return Some(StepListEvent::Back);
        }

        let list_top = self.area.y + 1;
        let list_bottom = bottom_border.saturating_sub(DETAIL_HEIGHT);
        if row < list_top || row >= list_bottom {
            return None;
        }
        let index = (row - list_top) as usize + self.list_state.offset();
        if index >= self.item_count {
            return None;
        }
        self.move_to(index)
    }
}

impl EventHandler for StepListState {
    type Event = StepListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<StepListEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(StepListEvent::Back),
            TuiEvent::CursorUp => {
                let index = match self.list_state.selected() {
                    Some(_) => self.selected.saturating_sub(1),
                    None => 0,
                };
                self.move_to(index)
            }
            TuiEvent::CursorDown => {
                let index = match self.list_state.selected() {
                    Some(_) => self.selected.saturating_add(1),
                    None => 0,
                };
                self.move_to(index)
            }
            TuiEvent::Submit => self.move_to(self.selected),
            TuiEvent::MouseDown(col, row) => self.click(*col, *row),
            _ => None,
        }
    }
}

/// Transient render wrapper for the step list.
pub struct StepList<'a> {
    state: &'a mut StepListState,
    action_name: &'a str,
    steps: &'a [Step],
    active: Option<usize>,
    loading: bool,
    spinner_frame: usize,
    status: &'a str,
}

impl<'a> StepList<'a> {
    pub fn new(
        state: &'a mut StepListState,
        action_name: &'a str,
        steps: &'a [Step],
        active: Option<usize>,
        loading: bool,
        spinner_frame: usize,
        status: &'a str,
    ) -> Self {
        Self {
            state,
            action_name,
            steps,
            active,
            loading,
            spinner_frame,
            status,
        }
    }
}

impl Component for StepList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let title_width = area.width.saturating_sub(9) as usize;
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", truncate_to_width(self.action_name, title_width)))
            .title(Line::from(Span::styled(" ✕ ", Style::default().fg(Color::Red))).right_aligned())
            .title_bottom(Line::from(" ← Esc Back  ↑↓ Step ").centered())
            .padding(Padding::horizontal(1));
        if !self.status.is_empty() {
            block = block.title_bottom(Line::from(format!(" {} ", self.status)).right_aligned());
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{spinner} Loading steps..."))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        if self.steps.is_empty() {
            let empty = Paragraph::new("No steps to show")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let [list_area, detail_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(DETAIL_HEIGHT)]).areas(inner);

        let text_width = list_area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let is_active = self.active == Some(i);
                let number_style = if is_active {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let marker = if step.region.is_some() { " ◎" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}", i + 1), number_style),
                    Span::raw(" "),
                    Span::raw(truncate_to_width(&step.instruction, text_width)),
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("› ");

        self.state.item_count = self.steps.len();
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        // Full text of the active step, since list rows are truncated
        if let Some(step) = self.active.and_then(|i| self.steps.get(i)) {
            let detail = Paragraph::new(step.instruction.as_str())
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: true });
            frame.render_widget(detail, detail_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::step;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn state_with(item_count: usize) -> StepListState {
        let mut state = StepListState::new();
        state.item_count = item_count;
        state
    }

    #[test]
    fn test_first_down_activates_first_step() {
        let mut state = state_with(3);
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), Some(StepListEvent::Activate(0)));
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), Some(StepListEvent::Activate(1)));
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), Some(StepListEvent::Activate(0)));
    }

    #[test]
    fn test_navigation_stays_in_range() {
        let mut state = state_with(2);
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 1);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(StepListEvent::Activate(1)));
    }

    #[test]
    fn test_empty_list_never_activates() {
        let mut state = state_with(0);
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut state = state_with(2);
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(StepListEvent::Back));
    }

    fn clickable(item_count: usize) -> StepListState {
        let mut state = state_with(item_count);
        state.area = Rect::new(2, 4, 44, 18);
        state
    }

    #[test]
    fn test_click_step_activates_it() {
        let mut state = clickable(3);
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(10, 6)), Some(StepListEvent::Activate(1)));
        assert_eq!(state.selected, 1);
        assert_eq!(state.list_state.selected(), Some(1));
        // Past the last step
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(10, 9)), None);
    }

    #[test]
    fn test_click_back_hint_goes_back() {
        let mut state = clickable(3);
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(20, 21)), Some(StepListEvent::Back));
    }

    #[test]
    fn test_click_close_collapses() {
        let mut state = clickable(3);
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(43, 4)), Some(StepListEvent::Collapse));
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(70, 4)), None);
    }

    #[test]
    fn test_renders_numbered_steps() {
        let backend = TestBackend::new(44, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let steps = vec![step("Click gear icon", Some("3")), step("Choose General", None)];
        let mut state = state_with(steps.len());
        terminal
            .draw(|f| {
                StepList::new(&mut state, "Open Settings", &steps, Some(0), false, 0, "")
                    .render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Open Settings"));
        assert!(text.contains("✕"));
        assert!(text.contains(" 1 Click gear icon"));
        assert!(text.contains(" 2 Choose General"));
    }
}

//! # Grid Overlay Component
//!
//! Splits the whole terminal into a 3×3 grid and outlines the cell the active
//! step points at. Cells are numbered row by row:
//!
//! ```text
//! ┌───┬───┬───┐
//! │ 1 │ 2 │ 3 │
//! ├───┼───┼───┤
//! │ 4 │ 5 │ 6 │
//! ├───┼───┼───┤
//! │ 7 │ 8 │ 9 │
//! └───┴───┴───┘
//! ```
//!
//! A region that is not a cell number still shows the grid, just with no
//! cell lit.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::core::highlight::{HighlightOverlay, HighlightState};
use crate::tui::component::Component;

/// Persistent overlay state. The core pushes a full `HighlightState` on
/// every change, so this just stores the latest one.
#[derive(Debug, Default)]
pub struct GridOverlayState {
    pub highlight: HighlightState,
}

impl HighlightOverlay for GridOverlayState {
    fn apply(&mut self, state: HighlightState) {
        log::debug!("Highlight overlay: {:?}", state);
        self.highlight = state;
    }
}

impl GridOverlayState {
    pub fn is_visible(&self) -> bool {
        self.highlight.visible
    }

    /// The lit cell as 0-based (row, column).
    pub fn lit_cell(&self) -> Option<(usize, usize)> {
        let cell = self.highlight.region.as_ref()?.grid_cell()?;
        let index = usize::from(cell - 1);
        Some((index / 3, index % 3))
    }
}

/// Splits `area` into nine cells, row-major.
pub fn grid_cells(area: Rect) -> [[Rect; 3]; 3] {
    let thirds = [
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    let rows: [Rect; 3] = Layout::vertical(thirds).areas(area);
    rows.map(|row| Layout::horizontal(thirds).areas(row))
}

/// Transient render wrapper for the grid.
pub struct GridOverlay<'a> {
    state: &'a GridOverlayState,
}

impl<'a> GridOverlay<'a> {
    pub fn new(state: &'a GridOverlayState) -> Self {
        Self { state }
    }
}

impl Component for GridOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.state.is_visible() {
            return;
        }

        let lit = self.state.lit_cell();
        for (r, row) in grid_cells(area).iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let number = r * 3 + c + 1;
                if lit == Some((r, c)) {
                    let block = Block::bordered()
                        .border_type(BorderType::Thick)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(format!(" {number} "));
                    let label = Paragraph::new("▶ Look here ◀")
                        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                        .alignment(Alignment::Center)
                        .block(block);
                    frame.render_widget(label, *cell);
                } else {
                    let block = Block::bordered()
                        .border_style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
                        .title(format!(" {number} "));
                    frame.render_widget(block, *cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionId;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn showing(region: &str) -> GridOverlayState {
        let mut state = GridOverlayState::default();
        state.apply(HighlightState {
            region: Some(RegionId::new(region)),
            visible: true,
        });
        state
    }

    #[test]
    fn test_lit_cell_is_row_major() {
        assert_eq!(showing("1").lit_cell(), Some((0, 0)));
        assert_eq!(showing("3").lit_cell(), Some((0, 2)));
        assert_eq!(showing("5").lit_cell(), Some((1, 1)));
        assert_eq!(showing("7").lit_cell(), Some((2, 0)));
        assert_eq!(showing("9").lit_cell(), Some((2, 2)));
    }

    #[test]
    fn test_unknown_region_lights_nothing() {
        let state = showing("toolbar");
        assert!(state.is_visible());
        assert_eq!(state.lit_cell(), None);
    }

    #[test]
    fn test_grid_cells_cover_area() {
        let cells = grid_cells(Rect::new(0, 0, 90, 30));
        assert_eq!(cells[0][0], Rect::new(0, 0, 30, 10));
        assert_eq!(cells[2][2], Rect::new(60, 20, 30, 10));
    }

    fn render_text(state: &GridOverlayState) -> String {
        let backend = TestBackend::new(60, 18);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| GridOverlay::new(state).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_hidden_overlay_draws_nothing() {
        let text = render_text(&GridOverlayState::default());
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_visible_overlay_marks_cell() {
        let text = render_text(&showing("5"));
        assert!(text.contains("Look here"));
    }

    #[test]
    fn test_hide_after_show() {
        let mut state = showing("2");
        state.apply(HighlightState::hidden());
        assert!(!state.is_visible());
        assert!(render_text(&state).trim().is_empty());
    }
}

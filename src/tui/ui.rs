use crate::core::state::{Panel, Session};
use crate::tui::component::Component;
use crate::tui::components::{ActionList, GridOverlay, StepList, Trigger};
use crate::tui::TuiState;

use ratatui::layout::Rect;
use ratatui::Frame;

pub const PANEL_WIDTH: u16 = 44;
pub const PANEL_MAX_HEIGHT: u16 = 18;

/// Draw order matters: the grid sits underneath, the panel on top.
pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, spinner_frame: usize) {
    let frame_area = frame.area();

    GridOverlay::new(&tui.grid).render(frame, frame_area);

    let trigger_area = tui.trigger.area();
    Trigger {
        expanded: session.is_expanded(),
        loading: session.is_loading(),
        spinner_frame,
    }
    .render(frame, trigger_area);

    let panel_area = panel_rect(trigger_area, frame_area);
    match session.panel() {
        Panel::Collapsed => {}
        Panel::Actions(p) => {
            let filtered = session.filtered_actions();
            ActionList::new(
                &mut tui.action_list,
                &filtered,
                !p.actions.is_empty(),
                p.loading,
                spinner_frame,
                &session.status_message,
            )
            .render(frame, panel_area);
        }
        Panel::Steps(p) => {
            StepList::new(
                &mut tui.step_list,
                &p.current.name,
                &p.steps,
                p.active_step,
                p.loading,
                spinner_frame,
                &session.status_message,
            )
            .render(frame, panel_area);
        }
    }
}

/// Where the expanded panel goes: under the trigger when it fits, above it
/// otherwise, always inside the frame.
pub fn panel_rect(trigger: Rect, frame_area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(frame_area.width);
    let below = frame_area.bottom().saturating_sub(trigger.bottom());
    let above = trigger.y.saturating_sub(frame_area.y);

    let (y, height) = if below >= PANEL_MAX_HEIGHT || below >= above {
        (trigger.bottom(), below.min(PANEL_MAX_HEIGHT))
    } else {
        let height = above.min(PANEL_MAX_HEIGHT);
        (trigger.y - height, height)
    };

    // Right-align with the trigger when the panel would run off the right edge
    let max_x = frame_area.right().saturating_sub(width);
    let x = trigger.x.min(max_x).max(frame_area.x);

    Rect::new(x, y, width, height)
}

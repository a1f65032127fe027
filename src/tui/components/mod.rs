//! # TUI Components
//!
//! All UI components for the overlay.
//!
//! ## Component Architecture
//!
//! Every component here uses persistent state + a transient render wrapper:
//! the `*State` struct lives in `TuiState` across frames and handles events,
//! while the wrapper is built each frame with borrowed state and props.
//!
//! - `Trigger`: the floating button (drag, toggle, close)
//! - `ActionList`: search box and action list
//! - `StepList`: numbered steps for one action
//! - `GridOverlay`: the 3×3 region highlight drawn under everything else
//!
//! ## Props-Based Data Flow
//!
//! Components receive session data as props, never the `Session` itself.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! ActionList::new(&mut tui.action_list, &filtered, has_any, loading, frame, status)
//!
//! // Bad: hidden dependency on the session
//! ActionList::new(&mut tui.action_list, &session)
//! ```

pub mod action_list;
pub mod grid_overlay;
pub mod step_list;
pub mod trigger;

pub use action_list::{ActionList, ActionListEvent, ActionListState};
pub use grid_overlay::{GridOverlay, GridOverlayState};
pub use step_list::{StepList, StepListEvent, StepListState};
pub use trigger::{Trigger, TriggerEvent, TriggerState};

use ratatui::layout::{Position, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The panel's `✕`, drawn as a right-aligned `" ✕ "` title on the top border.
pub fn panel_close_cell(area: Rect) -> Position {
    Position::new(area.right().saturating_sub(3), area.y)
}

/// Cuts `s` to at most `max_width` terminal columns, ending in `...` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_cell_sits_left_of_the_corner() {
        let cell = panel_close_cell(Rect::new(2, 4, 44, 18));
        assert_eq!(cell, Position::new(43, 4));
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("Open Settings", 20), "Open Settings");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Open Settings", 8), "Open ...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_to_width("Open Settings", 2), "..");
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_to_width("設定を開く", 7), "設定...");
    }
}

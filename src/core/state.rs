//! # Session State
//!
//! The overlay's single mutable record. Panel variants carry their own data,
//! so the cross-field rules hold by construction:
//!
//! ```text
//! Session
//! ├── panel: Panel
//! │   ├── Collapsed
//! │   ├── Actions(ActionsPanel)   loading, actions, query
//! │   └── Steps(StepsPanel)       loading, actions (kept for back), current, steps, active_step
//! ├── generation: u64             bumped by every transition that starts or abandons a retrieval
//! ├── highlight: HighlightCoordinator
//! └── status_message: String
//! ```
//!
//! Transitions live in `event.rs`. Nothing here performs I/O: a transition that
//! needs a retrieval returns an `Effect` and the adapter runs it.

use crate::catalog::{Action, Step};
use crate::core::filter::filter_actions;
use crate::core::highlight::HighlightCoordinator;

/// Which panel is showing, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Collapsed,
    ExpandedActions,
    ExpandedSteps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionsPanel {
    pub loading: bool,
    pub actions: Vec<Action>,
    pub query: String,
}

impl ActionsPanel {
    pub fn loading() -> Self {
        Self {
            loading: true,
            actions: Vec::new(),
            query: String::new(),
        }
    }

    /// A settled panel over an already fetched list (used when navigating back).
    pub fn loaded(actions: Vec<Action>) -> Self {
        Self {
            loading: false,
            actions,
            query: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepsPanel {
    pub loading: bool,
    /// The action list from the expansion that led here, restored by `back()`.
    pub actions: Vec<Action>,
    pub current: Action,
    pub steps: Vec<Step>,
    pub active_step: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Collapsed,
    Actions(ActionsPanel),
    Steps(StepsPanel),
}

pub struct Session {
    pub(crate) panel: Panel,
    pub(crate) generation: u64,
    pub(crate) highlight: HighlightCoordinator,
    pub status_message: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HighlightCoordinator::default())
    }
}

impl Session {
    pub fn new(highlight: HighlightCoordinator) -> Self {
        Self {
            panel: Panel::Collapsed,
            generation: 0,
            highlight,
            status_message: String::new(),
        }
    }

    /// Starts from an arbitrary panel. Handy for tests and for restoring a view.
    pub fn with_panel(panel: Panel, highlight: HighlightCoordinator) -> Self {
        Self {
            panel,
            ..Self::new(highlight)
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_kind(&self) -> PanelKind {
        match self.panel {
            Panel::Collapsed => PanelKind::Collapsed,
            Panel::Actions(_) => PanelKind::ExpandedActions,
            Panel::Steps(_) => PanelKind::ExpandedSteps,
        }
    }

    pub fn is_expanded(&self) -> bool {
        !matches!(self.panel, Panel::Collapsed)
    }

    pub fn is_loading(&self) -> bool {
        match &self.panel {
            Panel::Collapsed => false,
            Panel::Actions(p) => p.loading,
            Panel::Steps(p) => p.loading,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn highlight(&self) -> HighlightCoordinator {
        self.highlight
    }

    /// Fetched actions. Empty while collapsed; kept (not refetched) while a
    /// step list is open so `back()` can restore them.
    pub fn actions(&self) -> &[Action] {
        match &self.panel {
            Panel::Collapsed => &[],
            Panel::Actions(p) => &p.actions,
            Panel::Steps(p) => &p.actions,
        }
    }

    /// Search box contents. Always empty outside the actions panel.
    pub fn search_query(&self) -> &str {
        match &self.panel {
            Panel::Actions(p) => &p.query,
            _ => "",
        }
    }

    /// Actions narrowed by the current query.
    pub fn filtered_actions(&self) -> Vec<Action> {
        match &self.panel {
            Panel::Actions(p) => filter_actions(&p.actions, &p.query),
            _ => Vec::new(),
        }
    }

    pub fn current_action(&self) -> Option<&Action> {
        match &self.panel {
            Panel::Steps(p) => Some(&p.current),
            _ => None,
        }
    }

    pub fn steps(&self) -> &[Step] {
        match &self.panel {
            Panel::Steps(p) => &p.steps,
            _ => &[],
        }
    }

    pub fn active_step_index(&self) -> Option<usize> {
        match &self.panel {
            Panel::Steps(p) => p.active_step,
            _ => None,
        }
    }

    pub fn active_step(&self) -> Option<&Step> {
        match &self.panel {
            Panel::Steps(p) => p.active_step.and_then(|i| p.steps.get(i)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{action, step};

    #[test]
    fn test_session_new_defaults() {
        let session = Session::default();
        assert_eq!(session.panel_kind(), PanelKind::Collapsed);
        assert!(!session.is_loading());
        assert!(session.actions().is_empty());
        assert!(session.current_action().is_none());
        assert!(session.steps().is_empty());
        assert_eq!(session.search_query(), "");
        assert_eq!(session.active_step_index(), None);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_steps_panel_views() {
        let panel = Panel::Steps(StepsPanel {
            loading: false,
            actions: vec![action(1, "Open Settings")],
            current: action(1, "Open Settings"),
            steps: vec![step("Click gear icon", Some("3")), step("Pick a tab", None)],
            active_step: Some(1),
        });
        let session = Session::with_panel(panel, HighlightCoordinator::default());

        assert_eq!(session.panel_kind(), PanelKind::ExpandedSteps);
        assert_eq!(session.current_action().map(|a| a.name.as_str()), Some("Open Settings"));
        assert_eq!(session.steps().len(), 2);
        assert_eq!(session.active_step().map(|s| s.instruction.as_str()), Some("Pick a tab"));
        assert_eq!(session.search_query(), "");
        assert!(session.filtered_actions().is_empty());
    }

    #[test]
    fn test_filtered_actions_uses_query() {
        let mut panel = ActionsPanel::loaded(vec![action(1, "Open Settings"), action(2, "Close App")]);
        panel.query = "app".to_string();
        let session = Session::with_panel(Panel::Actions(panel), HighlightCoordinator::default());

        let names: Vec<String> = session.filtered_actions().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Close App"]);
        assert_eq!(session.actions().len(), 2);
    }
}

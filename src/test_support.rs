//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::catalog::{Action, ActionId, Catalog, RegionId, RetrievalError, Step};
use crate::core::event::{Effect, Event, update};
use crate::core::highlight::{HighlightOverlay, HighlightState};
use crate::core::state::{PanelKind, Session};

pub fn action(id: i64, name: &str) -> Action {
    Action {
        id: ActionId::from(id),
        name: name.to_string(),
    }
}

pub fn step(instruction: &str, region: Option<&str>) -> Step {
    Step {
        instruction: instruction.to_string(),
        region: region.map(RegionId::new),
    }
}

/// An in-memory catalog with canned answers. Counts calls so tests can
/// check nothing was refetched.
pub struct ScriptedCatalog {
    actions: Result<Vec<Action>, RetrievalError>,
    steps: Vec<(ActionId, Result<Vec<Step>, RetrievalError>)>,
    action_calls: AtomicUsize,
    step_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new(actions: Result<Vec<Action>, RetrievalError>) -> Self {
        Self {
            actions,
            steps: Vec::new(),
            action_calls: AtomicUsize::new(0),
            step_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_steps(mut self, id: i64, steps: Result<Vec<Step>, RetrievalError>) -> Self {
        self.steps.push((ActionId::from(id), steps));
        self
    }

    pub fn action_calls(&self) -> usize {
        self.action_calls.load(Ordering::SeqCst)
    }

    pub fn step_calls(&self) -> usize {
        self.step_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list_actions(&self) -> Result<Vec<Action>, RetrievalError> {
        self.action_calls.fetch_add(1, Ordering::SeqCst);
        self.actions.clone()
    }

    async fn list_steps(&self, action_id: &ActionId) -> Result<Vec<Step>, RetrievalError> {
        self.step_calls.fetch_add(1, Ordering::SeqCst);
        self.steps
            .iter()
            .find(|(id, _)| id == action_id)
            .map(|(_, steps)| steps.clone())
            .unwrap_or_else(|| {
                Err(RetrievalError::Status {
                    status: 404,
                    message: format!("unknown action {action_id}"),
                })
            })
    }
}

/// Remembers every state it was handed.
#[derive(Default)]
pub struct RecordingOverlay {
    pub states: Vec<HighlightState>,
}

impl RecordingOverlay {
    pub fn last(&self) -> Option<&HighlightState> {
        self.states.last()
    }
}

impl HighlightOverlay for RecordingOverlay {
    fn apply(&mut self, state: HighlightState) {
        self.states.push(state);
    }
}

/// Feeds an event through `update` and runs the resulting effects inline,
/// the way the TUI loop does but without spawning. Returns the last effect
/// that was not a fetch.
pub async fn dispatch(
    session: &mut Session,
    catalog: &dyn Catalog,
    overlay: &mut RecordingOverlay,
    event: Event,
) -> Effect {
    let mut effect = update(session, event);
    loop {
        effect = match effect {
            Effect::FetchActions { generation } => {
                let result = catalog.list_actions().await;
                update(session, Event::ActionsLoaded { generation, result })
            }
            Effect::FetchSteps {
                generation,
                action_id,
            } => {
                let result = catalog.list_steps(&action_id).await;
                update(session, Event::StepsLoaded { generation, result })
            }
            Effect::Highlight(state) => {
                overlay.apply(state.clone());
                return Effect::Highlight(state);
            }
            other => return other,
        };
    }
}

/// Checks the cross-field rules of the session record.
pub fn assert_invariants(session: &Session) {
    let kind = session.panel_kind();

    if !session.steps().is_empty() {
        assert_eq!(kind, PanelKind::ExpandedSteps, "steps outside the step panel");
    }
    assert_eq!(
        session.current_action().is_some(),
        kind == PanelKind::ExpandedSteps,
        "current action set iff the step panel is open"
    );
    if kind != PanelKind::ExpandedActions {
        assert_eq!(session.search_query(), "", "query survives outside the action panel");
    }
    if let Some(index) = session.active_step_index() {
        assert!(index < session.steps().len(), "active step out of range");
    }
    if kind == PanelKind::Collapsed {
        assert!(session.actions().is_empty(), "actions kept after collapse");
        assert!(!session.is_loading(), "collapsed but loading");
    }
}

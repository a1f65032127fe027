//! # Events
//!
//! Everything that can happen to the overlay becomes an `Event`.
//! User clicks the trigger? That's `Event::Toggle`.
//! The catalog answers? That's `Event::ActionsLoaded { generation, result }`.
//!
//! `update()` applies an event to the `Session` and returns the single
//! `Effect` the adapter has to carry out. No I/O happens here.
//!
//! ```text
//! Session + Event  →  update()  →  Effect  →  adapter (spawn fetch, highlight, close)
//!                        ▲                            │
//!                        └──── *Loaded { generation } ◄┘
//! ```
//!
//! Every transition that starts or abandons a retrieval bumps the session
//! generation. A completion carrying an older generation is dropped, which is
//! how a late answer after `collapse()` or `back()` is kept out of the state.

use log::{debug, info, warn};

use crate::catalog::{Action, ActionId, RetrievalError, Step};
use crate::core::highlight::HighlightState;
use crate::core::state::{ActionsPanel, Panel, PanelKind, Session, StepsPanel};

#[derive(Debug)]
pub enum Event {
    /// Open the panel and fetch actions.
    Expand,
    /// Close the panel, dropping everything fetched.
    Collapse,
    /// Trigger click: expand when collapsed, collapse otherwise.
    Toggle,
    SelectAction(Action),
    /// Leave the step list for the action list.
    Back,
    SetSearchQuery(String),
    SelectStep(usize),
    /// Re-issue the retrieval for the open panel after it came back empty.
    Retry,
    /// Close the whole overlay.
    Dismiss,
    ActionsLoaded {
        generation: u64,
        result: Result<Vec<Action>, RetrievalError>,
    },
    StepsLoaded {
        generation: u64,
        result: Result<Vec<Step>, RetrievalError>,
    },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchActions { generation: u64 },
    FetchSteps { generation: u64, action_id: ActionId },
    Highlight(HighlightState),
    CloseHost,
}

pub fn update(session: &mut Session, event: Event) -> Effect {
    debug!(
        "update: {:?} (panel={:?}, generation={})",
        event,
        session.panel_kind(),
        session.generation
    );

    match event {
        Event::Expand => session.expand(),
        Event::Collapse => session.collapse(),
        Event::Toggle => session.toggle(),
        Event::SelectAction(action) => session.select_action(action),
        Event::Back => session.back(),
        Event::SetSearchQuery(query) => session.set_search_query(query),
        Event::SelectStep(index) => session.select_step(index),
        Event::Retry => session.retry(),
        Event::Dismiss => session.dismiss(),
        Event::ActionsLoaded { generation, result } => session.apply_actions(generation, result),
        Event::StepsLoaded { generation, result } => session.apply_steps(generation, result),
    }
}

/// Caller asked for a transition the current panel does not allow.
/// That is a coordination bug, so debug builds stop right here.
fn misuse(operation: &str, panel: PanelKind) -> Effect {
    debug_assert!(false, "{operation} is not valid while {panel:?}");
    warn!("Ignoring {} while {:?}", operation, panel);
    Effect::None
}

impl Session {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn expand(&mut self) -> Effect {
        match &self.panel {
            Panel::Collapsed => {
                let generation = self.next_generation();
                self.panel = Panel::Actions(ActionsPanel::loading());
                self.status_message = "Loading actions...".to_string();
                Effect::FetchActions { generation }
            }
            // A settled, empty list is the retry path
            Panel::Actions(p) if !p.loading && p.actions.is_empty() => self.retry(),
            _ => {
                debug!("expand ignored: already expanded");
                Effect::None
            }
        }
    }

    pub fn collapse(&mut self) -> Effect {
        self.next_generation();
        let had_steps = matches!(self.panel, Panel::Steps(_));
        self.panel = Panel::Collapsed;
        self.status_message.clear();

        if had_steps {
            Effect::Highlight(self.highlight.hidden())
        } else {
            Effect::None
        }
    }

    pub fn toggle(&mut self) -> Effect {
        if self.is_expanded() {
            self.collapse()
        } else {
            self.expand()
        }
    }

    pub fn select_action(&mut self, action: Action) -> Effect {
        let kind = self.panel_kind();
        let Panel::Actions(panel) = &mut self.panel else {
            return misuse("select_action", kind);
        };
        if panel.loading {
            debug!("select_action ignored: actions still loading");
            return Effect::None;
        }
        debug_assert!(
            panel.actions.iter().any(|a| a.id == action.id),
            "selected action {} was never retrieved",
            action.id
        );

        let actions = std::mem::take(&mut panel.actions);
        let generation = self.next_generation();
        let action_id = action.id.clone();
        self.status_message = format!("Loading steps for {}...", action.name);
        self.panel = Panel::Steps(StepsPanel {
            loading: true,
            actions,
            current: action,
            steps: Vec::new(),
            active_step: None,
        });

        Effect::FetchSteps {
            generation,
            action_id,
        }
    }

    pub fn back(&mut self) -> Effect {
        let kind = self.panel_kind();
        let Panel::Steps(panel) = &mut self.panel else {
            return misuse("back", kind);
        };

        let actions = std::mem::take(&mut panel.actions);
        // An outstanding steps fetch is now stale
        self.next_generation();
        self.panel = Panel::Actions(ActionsPanel::loaded(actions));
        self.status_message.clear();

        Effect::Highlight(self.highlight.hidden())
    }

    pub fn set_search_query(&mut self, query: String) -> Effect {
        let kind = self.panel_kind();
        let Panel::Actions(panel) = &mut self.panel else {
            return misuse("set_search_query", kind);
        };
        panel.query = query;
        Effect::None
    }

    pub fn select_step(&mut self, index: usize) -> Effect {
        let kind = self.panel_kind();
        let Panel::Steps(panel) = &mut self.panel else {
            return misuse("select_step", kind);
        };
        let Some(step) = panel.steps.get(index) else {
            debug_assert!(false, "step index {index} out of range ({} steps)", panel.steps.len());
            warn!("Ignoring select_step({}) with {} steps", index, panel.steps.len());
            return Effect::None;
        };

        let state = self.highlight.notify(Some(step));
        panel.active_step = Some(index);
        Effect::Highlight(state)
    }

    pub fn retry(&mut self) -> Effect {
        match &mut self.panel {
            Panel::Actions(p) if !p.loading && p.actions.is_empty() => {
                p.loading = true;
                self.status_message = "Loading actions...".to_string();
                let generation = self.next_generation();
                Effect::FetchActions { generation }
            }
            Panel::Steps(p) if !p.loading && p.steps.is_empty() => {
                p.loading = true;
                p.active_step = None;
                let action_id = p.current.id.clone();
                self.status_message = format!("Loading steps for {}...", p.current.name);
                let generation = self.next_generation();
                Effect::FetchSteps {
                    generation,
                    action_id,
                }
            }
            _ => {
                debug!("retry ignored: nothing to retry");
                Effect::None
            }
        }
    }

    /// Collapses and asks the host to close. The host clears the highlight
    /// overlay as part of closing, so `collapse()`'s hide effect is not needed.
    pub fn dismiss(&mut self) -> Effect {
        info!("Overlay dismissed");
        self.collapse();
        Effect::CloseHost
    }

    fn apply_actions(&mut self, generation: u64, result: Result<Vec<Action>, RetrievalError>) -> Effect {
        if generation != self.generation {
            debug!(
                "Discarding stale actions response (generation {} != {})",
                generation, self.generation
            );
            return Effect::None;
        }
        let kind = self.panel_kind();
        let Panel::Actions(panel) = &mut self.panel else {
            debug!("Discarding actions response: panel is {:?}", kind);
            return Effect::None;
        };
        if !panel.loading {
            debug!("Discarding duplicate actions response (generation {})", generation);
            return Effect::None;
        }

        panel.loading = false;
        match result {
            Ok(actions) => {
                info!("Loaded {} actions", actions.len());
                self.status_message = if actions.is_empty() {
                    "No actions available".to_string()
                } else {
                    format!("{} actions", actions.len())
                };
                panel.actions = actions;
            }
            Err(e) => {
                warn!("Failed to load actions: {}", e);
                panel.actions.clear();
                self.status_message = "Could not load actions (Ctrl+R to retry)".to_string();
            }
        }
        Effect::None
    }

    fn apply_steps(&mut self, generation: u64, result: Result<Vec<Step>, RetrievalError>) -> Effect {
        if generation != self.generation {
            debug!(
                "Discarding stale steps response (generation {} != {})",
                generation, self.generation
            );
            return Effect::None;
        }
        let kind = self.panel_kind();
        let Panel::Steps(panel) = &mut self.panel else {
            debug!("Discarding steps response: panel is {:?}", kind);
            return Effect::None;
        };
        if !panel.loading {
            debug!("Discarding duplicate steps response (generation {})", generation);
            return Effect::None;
        }

        panel.loading = false;
        match result {
            Ok(steps) => {
                info!("Loaded {} steps for action {}", steps.len(), panel.current.id);
                self.status_message = if steps.is_empty() {
                    "No steps for this action".to_string()
                } else {
                    format!("{} steps", steps.len())
                };
                panel.steps = steps;
            }
            Err(e) => {
                warn!("Failed to load steps for action {}: {}", panel.current.id, e);
                panel.steps.clear();
                self.status_message = "Could not load steps (Ctrl+R to retry)".to_string();
            }
        }
        Effect::None
    }
}

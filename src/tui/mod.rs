//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the overlay,
//! translates keyboard and mouse input into core `Event` values, and runs
//! the `Effect`s the core hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a fetch is in flight, or the trigger is being dragged):
//!   draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms and only redraws on input, resize or a
//!   finished fetch.
//!
//! ## Retrievals
//!
//! Fetches run on tokio tasks and report back over a std `mpsc` channel as
//! `ActionsLoaded` / `StepsLoaded`, tagged with the generation they were
//! started under. Superseded tasks are left to finish; the core drops their
//! results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::catalog::{ActionId, Catalog, HttpCatalog};
use crate::core::config::ResolvedConfig;
use crate::core::highlight::{HighlightCoordinator, HighlightOverlay, HighlightState};
use crate::core::{Effect, Event, PanelKind, Session, update};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ActionListEvent, ActionListState, GridOverlayState, StepListEvent, StepListState,
    TriggerEvent, TriggerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the core session)
pub struct TuiState {
    // Persistent component states
    pub trigger: TriggerState,
    pub action_list: ActionListState,
    pub step_list: StepListState,
    pub grid: GridOverlayState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            trigger: TriggerState::new(2, 1),
            action_list: ActionListState::new(),
            step_list: StepListState::new(),
            grid: GridOverlayState::default(),
        }
    }

    /// Copy session data the components need before they see any input.
    fn sync_props(&mut self, session: &Session) {
        let panel_area = ui::panel_rect(self.trigger.area(), self.trigger.bounds);
        self.action_list.area = panel_area;
        self.step_list.area = panel_area;
        self.action_list.query = session.search_query().to_string();
        self.action_list.item_count = session.filtered_actions().len();
        self.step_list.item_count = session.steps().len();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Build the catalog client from a resolved config.
pub fn build_catalog(config: &ResolvedConfig) -> Arc<dyn Catalog> {
    Arc::new(HttpCatalog::new(
        Some(config.catalog_url.clone()),
        config.timeout,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = build_catalog(&config);
    info!("Using catalog '{}' at {}", catalog.name(), config.catalog_url);

    let mut session = Session::new(HighlightCoordinator::new(config.highlight_enabled));
    if !session.highlight().is_enabled() {
        info!("Region highlighting is off; steps will not light the grid");
    }
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completions from background fetches
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.trigger.bounds = terminal.get_frame().area();
        tui.sync_props(&session);

        let animating = session.is_loading() || tui.trigger.is_dragging();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Each event must see the panel and trigger position left by the previous one
            tui.sync_props(&session);
            let Some(core_event) = route_event(&event, &session, &mut tui) else {
                continue;
            };
            let effect = update(&mut session, core_event);
            if !run_effect(effect, &catalog, &mut tui, &tx) {
                break 'main;
            }
        }

        // Handle completions from background fetches
        while let Ok(event) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut session, event);
            if !run_effect(effect, &catalog, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Turns terminal input into at most one core event, based on which panel
/// is showing.
fn route_event(event: &TuiEvent, session: &Session, tui: &mut TuiState) -> Option<Event> {
    match event {
        // Resize just needs a redraw (already flagged)
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Event::Dismiss),
        TuiEvent::Retry => Some(Event::Retry),
        TuiEvent::MouseDown(..) | TuiEvent::MouseDrag(..) | TuiEvent::MouseUp(..) => {
            match tui.trigger.handle_event(event) {
                Some(TriggerEvent::Toggle) => {
                    if !session.is_expanded() {
                        tui.action_list.reset_selection();
                    }
                    Some(Event::Toggle)
                }
                Some(TriggerEvent::Close) => Some(Event::Dismiss),
                // Clicks the trigger didn't take may land on the panel
                None if matches!(event, TuiEvent::MouseDown(..)) => {
                    route_panel_event(event, session, tui)
                }
                None => None,
            }
        }
        _ => route_panel_event(event, session, tui),
    }
}

fn route_panel_event(event: &TuiEvent, session: &Session, tui: &mut TuiState) -> Option<Event> {
    match session.panel_kind() {
        PanelKind::Collapsed => match event {
            TuiEvent::Submit => {
                tui.action_list.reset_selection();
                Some(Event::Expand)
            }
            _ => None,
        },
        PanelKind::ExpandedActions => match tui.action_list.handle_event(event)? {
            ActionListEvent::QueryChanged(query) => {
                tui.action_list.reset_selection();
                Some(Event::SetSearchQuery(query))
            }
            ActionListEvent::Select(index) => {
                if session.is_loading() {
                    return None;
                }
                let action = session.filtered_actions().into_iter().nth(index)?;
                tui.step_list.reset_selection();
                Some(Event::SelectAction(action))
            }
            ActionListEvent::Collapse => Some(Event::Collapse),
        },
        PanelKind::ExpandedSteps => match tui.step_list.handle_event(event)? {
            StepListEvent::Activate(index) if index < session.steps().len() => {
                Some(Event::SelectStep(index))
            }
            StepListEvent::Activate(_) => None,
            StepListEvent::Back => {
                tui.action_list.reset_selection();
                Some(Event::Back)
            }
            StepListEvent::Collapse => Some(Event::Collapse),
        },
    }
}

/// Carries out an effect. Returns `false` when the overlay should close.
fn run_effect(
    effect: Effect,
    catalog: &Arc<dyn Catalog>,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Event>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::FetchActions { generation } => {
            spawn_fetch_actions(catalog.clone(), generation, tx.clone());
        }
        Effect::FetchSteps {
            generation,
            action_id,
        } => {
            spawn_fetch_steps(catalog.clone(), generation, action_id, tx.clone());
        }
        Effect::Highlight(state) => tui.grid.apply(state),
        Effect::CloseHost => {
            info!("Closing overlay");
            tui.grid.apply(HighlightState::hidden());
            return false;
        }
    }
    true
}

fn spawn_fetch_actions(catalog: Arc<dyn Catalog>, generation: u64, tx: mpsc::Sender<Event>) {
    info!("Spawning actions fetch (generation={})", generation);
    tokio::spawn(async move {
        let started = Instant::now();
        let result = catalog.list_actions().await;
        debug!(
            "Actions fetch finished in {}ms (generation={}, ok={})",
            started.elapsed().as_millis(),
            generation,
            result.is_ok()
        );
        if tx.send(Event::ActionsLoaded { generation, result }).is_err() {
            warn!("Failed to send ActionsLoaded: receiver dropped");
        }
    });
}

fn spawn_fetch_steps(
    catalog: Arc<dyn Catalog>,
    generation: u64,
    action_id: ActionId,
    tx: mpsc::Sender<Event>,
) {
    info!(
        "Spawning steps fetch for action {} (generation={})",
        action_id, generation
    );
    tokio::spawn(async move {
        let started = Instant::now();
        let result = catalog.list_steps(&action_id).await;
        debug!(
            "Steps fetch for {} finished in {}ms (generation={}, ok={})",
            action_id,
            started.elapsed().as_millis(),
            generation,
            result.is_ok()
        );
        if tx.send(Event::StepsLoaded { generation, result }).is_err() {
            warn!("Failed to send StepsLoaded: receiver dropped");
        }
    });
}

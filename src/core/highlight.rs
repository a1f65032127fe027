//! # Step Highlight Coordinator
//!
//! Maps the active step to the region the highlight overlay should light up.
//! The overlay keeps no history of its own, so every change (including
//! "nothing is active any more") is pushed to it as a full `HighlightState`.

use crate::catalog::{RegionId, Step};

/// What the highlight overlay should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightState {
    pub region: Option<RegionId>,
    pub visible: bool,
}

impl HighlightState {
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// External collaborator that renders the highlight.
pub trait HighlightOverlay {
    fn apply(&mut self, state: HighlightState);
}

/// Stateless apart from the `enabled` switch taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightCoordinator {
    enabled: bool,
}

impl Default for HighlightCoordinator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl HighlightCoordinator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The step's region, if it has one and highlighting is on.
    pub fn resolve(&self, step: &Step) -> Option<RegionId> {
        if !self.enabled {
            return None;
        }
        step.region.clone()
    }

    /// Builds the overlay state for the given active step (or none).
    pub fn notify(&self, step: Option<&Step>) -> HighlightState {
        let region = step.and_then(|s| self.resolve(s));
        HighlightState {
            visible: region.is_some(),
            region,
        }
    }

    pub fn hidden(&self) -> HighlightState {
        HighlightState::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::step;

    #[test]
    fn test_resolve_returns_region() {
        let coordinator = HighlightCoordinator::default();
        let s = step("Click gear icon", Some("3"));
        assert_eq!(coordinator.resolve(&s), Some(RegionId::new("3")));
    }

    #[test]
    fn test_step_without_region_is_hidden() {
        let coordinator = HighlightCoordinator::default();
        let state = coordinator.notify(Some(&step("Click gear icon", None)));
        assert_eq!(state, HighlightState { region: None, visible: false });
    }

    #[test]
    fn test_visible_tracks_region() {
        let coordinator = HighlightCoordinator::default();
        let state = coordinator.notify(Some(&step("Open menu", Some("7"))));
        assert!(state.visible);
        assert_eq!(state.region, Some(RegionId::new("7")));
    }

    #[test]
    fn test_no_active_step_is_hidden() {
        let coordinator = HighlightCoordinator::default();
        assert_eq!(coordinator.notify(None), HighlightState::hidden());
    }

    #[test]
    fn test_disabled_coordinator_never_shows() {
        let coordinator = HighlightCoordinator::new(false);
        assert!(!coordinator.is_enabled());
        assert!(HighlightCoordinator::default().is_enabled());
        let s = step("Open menu", Some("7"));
        assert_eq!(coordinator.resolve(&s), None);
        assert!(!coordinator.notify(Some(&s)).visible);
    }
}

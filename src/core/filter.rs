//! # Search Filter
//!
//! Narrows the action list by the search box contents. Recomputed on every
//! render; the lists are small enough that memoizing buys nothing.

use crate::catalog::Action;

/// Case-insensitive substring match of `query` against each action name.
///
/// Relative order is preserved. An empty query returns the input unchanged.
pub fn filter_actions(actions: &[Action], query: &str) -> Vec<Action> {
    if query.is_empty() {
        return actions.to_vec();
    }

    let needle = query.to_lowercase();
    actions
        .iter()
        .filter(|action| action.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

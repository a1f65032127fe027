use std::fmt;

use async_trait::async_trait;

use super::types::{Action, ActionId, Step};

/// Errors from a single catalog retrieval.
///
/// The session treats every variant the same way (log, empty result), but
/// they are kept apart so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Status { status: u16, message: String },
    /// The body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalError::Network(msg) => write!(f, "network error: {msg}"),
            RetrievalError::Status { status, message } => {
                write!(f, "catalog error (HTTP {status}): {message}")
            }
            RetrievalError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// The remote source of actions and steps.
///
/// Both calls are single-shot: no retries and no caching at this layer.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns the name of the catalog backend.
    fn name(&self) -> &str;

    /// Fetches the ordered list of available actions.
    async fn list_actions(&self) -> Result<Vec<Action>, RetrievalError>;

    /// Fetches the ordered walkthrough for a previously retrieved action.
    async fn list_steps(&self, action_id: &ActionId) -> Result<Vec<Step>, RetrievalError>;
}

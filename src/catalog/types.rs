use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque action identifier, kept exactly as the catalog sent it.
///
/// The service may use numbers or strings; whichever it used is echoed back
/// verbatim in the `get-steps` request. Any JSON number is accepted, floats
/// and values past `i64` included.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ActionId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionId::Number(n) => write!(f, "{n}"),
            ActionId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ActionId {
    fn from(n: i64) -> Self {
        ActionId::Number(n.into())
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        ActionId::Text(s.to_string())
    }
}

/// A top-level task the assistant can explain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: ActionId,
    pub name: String,
}

/// Opaque reference to an on-screen area, consumed by the highlight overlay.
///
/// On the wire this is `grid_position`, which may be a number or a string.
/// Numbers are normalized to their decimal text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "RawRegion", into = "String")]
pub struct RegionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRegion {
    Number(serde_json::Number),
    Text(String),
}

/// Whole-valued floats (`3.0`) read as the integer they name.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl From<RawRegion> for RegionId {
    fn from(raw: RawRegion) -> Self {
        match raw {
            RawRegion::Number(n) => RegionId(number_text(&n)),
            RawRegion::Text(s) => RegionId(s),
        }
    }
}

impl From<RegionId> for String {
    fn from(region: RegionId) -> Self {
        region.0
    }
}

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        RegionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the identifier as a cell of the 3x3 grid (1..=9, row-major).
    pub fn grid_cell(&self) -> Option<u8> {
        match self.0.trim().parse::<u8>() {
            Ok(cell) if (1..=9).contains(&cell) => Some(cell),
            _ => None,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ordered instruction within an action's walkthrough.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub instruction: String,
    #[serde(
        rename = "grid_position",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<RegionId>,
}

// ============================================================================
// Wire envelopes
// ============================================================================

/// Body of `GET /actions`.
#[derive(Deserialize, Debug)]
pub struct ActionsResponse {
    pub actions: Vec<Action>,
}

/// Body of `POST /get-steps`.
#[derive(Serialize, Debug)]
pub struct StepsRequest<'a> {
    pub action_id: &'a ActionId,
}

/// Response of `POST /get-steps`.
#[derive(Deserialize, Debug)]
pub struct StepsResponse {
    pub steps: Vec<Step>,
}

//! # Core Overlay Logic
//!
//! The navigation-and-retrieval state machine behind the overlay.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Event (inputs)       │
//!                    │  • update() → Effect    │
//!                    │  • filter, highlight    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Catalog   │      │ Highlight  │      │    Host    │
//!     │  (fetch)   │      │  overlay   │      │  (close)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` record and its panel variants
//! - [`event`]: The `Event` enum, `Effect`, and the `update()` transitions
//! - [`filter`]: Search filtering of the action list
//! - [`highlight`]: Active step → highlight overlay state
//! - [`config`]: Settings file, env and CLI resolution

pub mod config;
pub mod event;
pub mod filter;
pub mod highlight;
pub mod state;

pub use event::{Effect, Event, update};
pub use state::{PanelKind, Session};

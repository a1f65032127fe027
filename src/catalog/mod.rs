pub mod client;
pub mod http;
pub mod types;

pub use client::{Catalog, RetrievalError};
pub use http::{DEFAULT_CATALOG_URL, HttpCatalog};
pub use types::{Action, ActionId, RegionId, Step};

//! HTTP catalog client.
//!
//! Talks to the action service over plain JSON:
//! - `GET  {base}/actions`   -> `{ "actions": [ { "id", "name" } ] }`
//! - `POST {base}/get-steps` with `{ "action_id" }` -> `{ "steps": [ { "instruction", "grid_position"? } ] }`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::client::{Catalog, RetrievalError};
use super::types::{Action, ActionId, ActionsResponse, Step, StepsRequest, StepsResponse};

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000";

/// Catalog backed by the remote action service.
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                reqwest::Client::new()
            }
        };

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Checks the status and decodes the body, mapping each failure to its kind.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RetrievalError> {
    let status = response.status();
    debug!("Catalog response status: {}", status);

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(RetrievalError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| RetrievalError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| RetrievalError::Parse(e.to_string()))
}

#[async_trait]
impl Catalog for HttpCatalog {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_actions(&self) -> Result<Vec<Action>, RetrievalError> {
        let url = format!("{}/actions", self.base_url);
        info!("Catalog request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RetrievalError::Network(e.to_string()))?;

        let body: ActionsResponse = read_json(response).await?;
        info!("Catalog returned {} actions", body.actions.len());
        Ok(body.actions)
    }

    async fn list_steps(&self, action_id: &ActionId) -> Result<Vec<Step>, RetrievalError> {
        let url = format!("{}/get-steps", self.base_url);
        info!("Catalog request: POST {} (action_id={})", url, action_id);

        let response = self
            .client
            .post(&url)
            .json(&StepsRequest { action_id })
            .send()
            .await
            .map_err(|e| RetrievalError::Network(e.to_string()))?;

        let body: StepsResponse = read_json(response).await?;
        info!(
            "Catalog returned {} steps for action {}",
            body.steps.len(),
            action_id
        );
        Ok(body.steps)
    }
}

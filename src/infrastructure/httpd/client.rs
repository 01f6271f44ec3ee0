//! HTTP client for node daemons.

use anyhow::{Context, Result};
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::HttpdError;
use crate::domain::models::{BaseUrl, NodeInfo};

/// Path prefix of the daemon's JSON API
pub const API_PREFIX: &str = "/api/v1";

/// Configuration for the node daemon HTTP client
#[derive(Debug, Clone)]
pub struct HttpdClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpdClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// JSON client for node HTTP daemons
///
/// One client serves every node; the target is chosen per request. No
/// retries are performed.
#[derive(Debug, Clone)]
pub struct HttpdClientImpl {
    http_client: ReqwestClient,
}

impl HttpdClientImpl {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpdClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: &HttpdClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(4)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http_client })
    }

    /// `GET {node}/api/v1{path}` and decode the JSON body
    #[instrument(skip(self, node, query), fields(node = %node), err)]
    pub async fn get_json(
        &self,
        node: &BaseUrl,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, HttpdError> {
        let url = format!("{}{API_PREFIX}{path}", node.url());
        debug!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpdError::Timeout(url.clone())
                } else {
                    HttpdError::NetworkError(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(&url, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HttpdError::InvalidBody(format!("{url}: {e}")))
    }

    /// `GET {node}/api/v1/node`, decoded into [`NodeInfo`]
    pub async fn get_node(&self, node: &BaseUrl) -> Result<NodeInfo, HttpdError> {
        let body = self.get_json(node, "/node", &[]).await?;
        serde_json::from_value(body)
            .map_err(|e| HttpdError::InvalidBody(format!("{node}{API_PREFIX}/node: {e}")))
    }

    async fn handle_error_response(url: &str, response: Response) -> HttpdError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        warn!("Daemon error ({}) for {}: {}", status, url, body);

        match status {
            StatusCode::NOT_FOUND => HttpdError::NotFound(url.to_string()),
            status if status.is_server_error() => HttpdError::ServerError(status, body),
            _ => HttpdError::Unexpected(status, body),
        }
    }
}

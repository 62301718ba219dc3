//! Rendering-proxy retrieval.
//!
//! Sends the listing URL to the Brightdata request API, which loads the page
//! in its own browser fleet, executes JavaScript, and returns the rendered
//! HTML. Useful on hosts without a Chromium install or when the registry
//! blocks datacenter IPs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::PageRetriever;
use crate::config::{RENDER_API_ENDPOINT, RENDER_API_KEY_VAR, RENDER_WAIT_MS};
use crate::error_handling::RetrieveError;

const SERVICE_NAME: &str = "Brightdata";

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    format: &'a str,
    render_js: bool,
    wait_for: u64,
}

#[derive(Debug, Deserialize)]
struct RenderResponse {
    content: Option<String>,
}

/// Retrieves listing pages through the Brightdata rendering API.
///
/// The API key is read from the environment on each fetch, so a run only
/// needs the credential when this strategy is actually selected.
pub struct RenderApiRetriever {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl RenderApiRetriever {
    /// Creates a retriever pointed at the production rendering endpoint.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            endpoint: RENDER_API_ENDPOINT.to_string(),
        }
    }

    /// Creates a retriever pointed at a custom endpoint.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client.
    /// * `endpoint` - Full URL of the rendering API to call.
    pub fn with_endpoint(client: Arc<reqwest::Client>, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    fn api_key() -> Result<String, RetrieveError> {
        std::env::var(RENDER_API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(RetrieveError::AuthMissing {
                service: SERVICE_NAME,
                env_var: RENDER_API_KEY_VAR,
            })
    }
}

#[async_trait]
impl PageRetriever for RenderApiRetriever {
    async fn fetch_page(&self, url: &Url) -> Result<String, RetrieveError> {
        let api_key = Self::api_key()?;
        log::info!("Requesting rendered copy of {url} from {SERVICE_NAME}");

        let request = RenderRequest {
            url: url.as_str(),
            format: "html",
            render_js: true,
            wait_for: RENDER_WAIT_MS,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RetrieveError::Upstream {
                service: SERVICE_NAME,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrieveError::Upstream {
                service: SERVICE_NAME,
                message: format!("request returned HTTP {status}"),
            });
        }

        let body: RenderResponse =
            response.json().await.map_err(|e| RetrieveError::Upstream {
                service: SERVICE_NAME,
                message: format!("invalid response body: {e}"),
            })?;
        body.content.ok_or_else(|| RetrieveError::Upstream {
            service: SERVICE_NAME,
            message: "response carried no rendered content".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "render-api"
    }
}

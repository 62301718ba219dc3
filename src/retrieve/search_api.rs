//! Search-index retrieval.
//!
//! Asks the Tavily search API for the listing page with raw page content
//! included, then uses the first result's cached copy as the document HTML.
//! The cache can lag the live site, but this strategy needs neither a local
//! browser nor a rendering proxy.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::PageRetriever;
use crate::config::{SEARCH_API_ENDPOINT, SEARCH_API_KEY_VAR};
use crate::error_handling::RetrieveError;

const SERVICE_NAME: &str = "Tavily";

/// Results per query; only the first is used.
const MAX_RESULTS: u32 = 1;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: String,
    include_raw_content: bool,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    raw_content: Option<String>,
}

/// Retrieves listing pages from the Tavily search API's page cache.
pub struct SearchApiRetriever {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl SearchApiRetriever {
    /// Creates a retriever pointed at the production search endpoint.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            endpoint: SEARCH_API_ENDPOINT.to_string(),
        }
    }

    /// Creates a retriever pointed at a custom endpoint.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client.
    /// * `endpoint` - Full URL of the search API to call.
    pub fn with_endpoint(client: Arc<reqwest::Client>, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    fn api_key() -> Result<String, RetrieveError> {
        std::env::var(SEARCH_API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(RetrieveError::AuthMissing {
                service: SERVICE_NAME,
                env_var: SEARCH_API_KEY_VAR,
            })
    }
}

#[async_trait]
impl PageRetriever for SearchApiRetriever {
    async fn fetch_page(&self, url: &Url) -> Result<String, RetrieveError> {
        let api_key = Self::api_key()?;
        log::info!("Looking up cached copy of {url} via {SERVICE_NAME}");

        let request = SearchRequest {
            api_key: &api_key,
            query: format!("site:{url}"),
            include_raw_content: true,
            max_results: MAX_RESULTS,
        };
        let response = self
            .client
            .post(&self.endpoint)
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

        let body: SearchResponse =
            response.json().await.map_err(|e| RetrieveError::Upstream {
                service: SERVICE_NAME,
                message: format!("invalid response body: {e}"),
            })?;
        body.results
            .into_iter()
            .next()
            .and_then(|result| result.raw_content)
            .ok_or_else(|| RetrieveError::NotFound {
                url: url.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "search-api"
    }
}

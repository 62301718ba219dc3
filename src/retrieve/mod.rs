//! Listing page retrieval strategies.
//!
//! The certificate registry renders its listing table with JavaScript, so a
//! plain GET returns a page without rows. Each retriever in this module
//! produces the fully rendered HTML a different way:
//!
//! - [`BrowserRetriever`] drives a local headless Chromium instance.
//! - [`RenderApiRetriever`] delegates rendering to a remote proxy service.
//! - [`SearchApiRetriever`] pulls cached page content from a search API.
//!
//! All three implement [`PageRetriever`], so the ingestion pipeline is
//! agnostic to which strategy the operator selected.

mod browser;
mod render_api;
mod search_api;

// Re-export public API
pub use browser::BrowserRetriever;
pub use render_api::RenderApiRetriever;
pub use search_api::SearchApiRetriever;

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::config::{Config, FetchStrategy};
use crate::error_handling::RetrieveError;

/// A strategy for obtaining the rendered HTML of a listing page.
///
/// Implementations may shell out to a headless browser, call a rendering
/// proxy, or query a search index. They share one contract: given a URL,
/// return the page HTML after client-side rendering has run, or a
/// [`RetrieveError`] describing why that was not possible.
#[async_trait]
pub trait PageRetriever: Send + Sync {
    /// Fetches the rendered HTML for `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - The listing page to retrieve.
    ///
    /// # Returns
    ///
    /// The rendered HTML document as a string.
    ///
    /// # Errors
    ///
    /// Returns a [`RetrieveError`] when the page cannot be produced; the
    /// variant identifies whether the failure was a timeout, a missing
    /// credential, an upstream service error, or an absent result.
    async fn fetch_page(&self, url: &Url) -> Result<String, RetrieveError>;

    /// Short human-readable strategy name used in log lines.
    fn name(&self) -> &'static str;
}

/// Builds the retriever selected by the configuration.
///
/// # Arguments
///
/// * `config` - Parsed command-line configuration.
/// * `client` - Shared HTTP client, reused by the proxy-backed strategies.
///
/// # Returns
///
/// A boxed retriever ready to fetch listing pages.
pub fn build_retriever(config: &Config, client: Arc<reqwest::Client>) -> Box<dyn PageRetriever> {
    match config.strategy {
        FetchStrategy::Browser => Box::new(BrowserRetriever::new(
            config.user_agent.clone(),
            config.timeout_seconds,
        )),
        FetchStrategy::RenderApi => Box::new(RenderApiRetriever::new(client)),
        FetchStrategy::SearchApi => Box::new(SearchApiRetriever::new(client)),
    }
}

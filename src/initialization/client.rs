//! HTTP client initialization.
//!
//! This module provides the shared HTTP client used for document downloads
//! and the proxy-backed retrieval strategies.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::ClientBuilder;

use crate::config::Config;

// Default headers mirroring what a desktop browser sends. The registry
// serves PDF downloads to browsers without fuss; a bare client UA with no
// Accept header tends to get challenged. Accept-Encoding is left to reqwest
// so response bodies arrive decompressed.
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const CONNECTION_VALUE: &str = "keep-alive";
const UPGRADE_INSECURE_REQUESTS_VALUE: &str = "1";

/// Initializes the HTTP client with default settings.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Timeout from the configuration
/// - Browser-like default headers
/// - Transparent gzip decompression
///
/// # Arguments
///
/// * `config` - Command-line configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client ready for making requests.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_VALUE));
    headers.insert(
        UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static(UPGRADE_INSECURE_REQUESTS_VALUE),
    );

    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .build()?;
    Ok(Arc::new(client))
}

//! Configuration constants.
//!
//! This module defines all compile-time constants used throughout the
//! application: default endpoints, timing parameters, and environment
//! variable names.

use std::time::Duration;

/// Default certificate listing page to harvest.
///
/// Points at the ISCC valid-certificates database, a JavaScript-rendered
/// page whose certificate table is populated after the initial page load.
/// Users can override this via the `--listing-url` CLI flag.
pub const DEFAULT_LISTING_URL: &str =
    "https://www.iscc-system.org/certification/certificate-database/valid-certificates/";

/// Default path of the persisted identity file (ingested-document hashes).
pub const DEFAULT_IDENTITY_FILE: &str = "processed_pdfs.json";

/// Default User-Agent string for HTTP requests.
///
/// Uses a generic Chrome-like string without a specific version number to avoid
/// becoming outdated. The pattern mimics a modern Chrome browser on Windows.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Politeness and rendering timing

/// Fixed pause between document downloads so the registry host is not hammered.
pub const DOWNLOAD_DELAY: Duration = Duration::from_secs(1);

/// How long the headless browser waits for the certificate table to appear
/// before the page load is treated as timed out.
pub const TABLE_WAIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Poll interval while waiting for the certificate table to appear.
pub const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Extra settle time after the table appears, giving client-side scripts a
/// chance to finish filling in rows before the page source is captured.
pub const RENDER_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Headless browser window width in pixels.
pub const BROWSER_WINDOW_WIDTH: u32 = 1920;

/// Headless browser window height in pixels.
pub const BROWSER_WINDOW_HEIGHT: u32 = 1080;

// Render proxy (Brightdata-style) API

/// Render proxy endpoint that fetches a URL with JavaScript execution.
pub const RENDER_API_ENDPOINT: &str = "https://api.brightdata.com/request";

/// Milliseconds the render proxy is asked to wait for dynamic content.
pub const RENDER_WAIT_MS: u64 = 3000;

/// Environment variable holding the render proxy API key.
pub const RENDER_API_KEY_VAR: &str = "BRIGHTDATA_API_KEY";

// Search proxy (Tavily-style) API

/// Search proxy endpoint that can return raw page content for a site query.
pub const SEARCH_API_ENDPOINT: &str = "https://api.tavily.com/search";

/// Environment variable holding the search proxy API key.
pub const SEARCH_API_KEY_VAR: &str = "TAVILY_API_KEY";

// Object storage

/// Environment variable fallback for the destination bucket (`--bucket`).
pub const BUCKET_VAR: &str = "CERT_HARVEST_BUCKET";

/// Environment variable fallback for the S3-compatible endpoint override
/// (`--s3-endpoint`), e.g. a local MinIO instance.
pub const ENDPOINT_VAR: &str = "S3_ENDPOINT";

/// Region used when the standard AWS environment chain yields none.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Top-level prefix under which all harvested documents are stored.
pub const KEY_PREFIX: &str = "certificates";

/// Maximum number of characters of the company name carried into object keys.
pub const COMPANY_KEY_MAX_LEN: usize = 50;

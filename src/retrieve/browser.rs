//! Headless-browser retrieval.
//!
//! Launches a local Chromium instance through the DevTools protocol, opens
//! the listing page, and waits until the certificate table has been rendered
//! before capturing the document HTML. A fresh browser is launched per fetch
//! so a crashed or wedged instance cannot poison later runs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use url::Url;

use super::PageRetriever;
use crate::config::{
    BROWSER_WINDOW_HEIGHT, BROWSER_WINDOW_WIDTH, RENDER_SETTLE_DELAY, TABLE_POLL_INTERVAL,
    TABLE_WAIT_TIMEOUT,
};
use crate::error_handling::RetrieveError;

/// CSS selector that must match before the page counts as rendered.
const TABLE_SELECTOR: &str = "table";

/// Retrieves listing pages by rendering them in a headless Chromium.
///
/// This is the default strategy: it needs no third-party credentials, only a
/// Chromium binary on the host.
pub struct BrowserRetriever {
    user_agent: String,
    timeout_seconds: u64,
}

impl BrowserRetriever {
    /// Creates a browser retriever.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - User agent string passed to Chromium.
    /// * `timeout_seconds` - Deadline for the initial page load.
    pub fn new(user_agent: String, timeout_seconds: u64) -> Self {
        Self {
            user_agent,
            timeout_seconds,
        }
    }
}

#[async_trait]
impl PageRetriever for BrowserRetriever {
    async fn fetch_page(&self, url: &Url) -> Result<String, RetrieveError> {
        log::info!("Rendering {url} in a headless browser");
        let session = BrowserSession::launch(&self.user_agent).await?;
        let result = session
            .render(url, Duration::from_secs(self.timeout_seconds))
            .await;
        session.close().await;
        result
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

/// A launched browser plus the background task draining its event stream.
///
/// The chromiumoxide handler stream must be polled continuously or the CDP
/// connection stalls, so launching spawns a drain task that lives as long as
/// the session. Prefer the explicit async [`close`](BrowserSession::close);
/// the `Drop` impl only covers error paths.
struct BrowserSession {
    browser: Option<Browser>,
    event_task: Option<JoinHandle<()>>,
}

impl BrowserSession {
    /// Launches a headless Chromium configured for scraping.
    async fn launch(user_agent: &str) -> Result<Self, RetrieveError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(BROWSER_WINDOW_WIDTH, BROWSER_WINDOW_HEIGHT)
            .arg(format!("--user-agent={user_agent}"))
            .build()
            .map_err(RetrieveError::RetrieverUnavailable)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            RetrieveError::RetrieverUnavailable(format!("failed to launch browser: {e}"))
        })?;

        let event_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser: Some(browser),
            event_task: Some(event_task),
        })
    }

    /// Opens `url`, waits for the table to render, and returns the HTML.
    async fn render(&self, url: &Url, page_load_timeout: Duration) -> Result<String, RetrieveError> {
        let browser = self.browser.as_ref().ok_or_else(|| {
            RetrieveError::RetrieverUnavailable("browser session already closed".to_string())
        })?;

        let open = async {
            let page = browser.new_page(url.as_str()).await?;
            if let Err(e) = page.wait_for_navigation().await {
                // Some pages keep long-polling connections open; the table
                // poll below is the authoritative readiness check.
                log::debug!("Navigation wait for {url} returned early: {e}");
            }
            Ok::<Page, chromiumoxide::error::CdpError>(page)
        };
        let page = tokio::time::timeout(page_load_timeout, open)
            .await
            .map_err(|_| RetrieveError::Timeout {
                url: url.to_string(),
            })?
            .map_err(|e| {
                RetrieveError::RetrieverUnavailable(format!("failed to open {url}: {e}"))
            })?;

        wait_for_table(&page, url).await?;
        log::debug!("Table detected on {url}; letting dynamic content settle");
        tokio::time::sleep(RENDER_SETTLE_DELAY).await;

        page.content().await.map_err(|e| {
            RetrieveError::RetrieverUnavailable(format!("failed to read content of {url}: {e}"))
        })
    }

    /// Shuts the browser down cleanly and stops the event drain.
    async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                log::debug!("Browser close failed: {e}");
            }
            if let Err(e) = browser.wait().await {
                log::debug!("Browser process wait failed: {e}");
            }
        }
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Dropping the Browser kills the child process, so the error path
        // only needs to stop the event drain.
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
    }
}

/// Polls for the certificate table until it appears or the wait times out.
async fn wait_for_table(page: &Page, url: &Url) -> Result<(), RetrieveError> {
    let deadline = Instant::now() + TABLE_WAIT_TIMEOUT;
    loop {
        if page.find_element(TABLE_SELECTOR).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(RetrieveError::Timeout {
                url: url.to_string(),
            });
        }
        tokio::time::sleep(TABLE_POLL_INTERVAL).await;
    }
}

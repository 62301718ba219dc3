//! cert_harvest library: certificate PDF discovery and ingestion
//!
//! This library discovers certificate documents on a certification registry's
//! listing page, downloads the PDFs it has not seen before, and uploads them
//! to S3-compatible object storage with descriptive metadata. Previously
//! ingested documents are remembered in a small identity file so repeated
//! runs only pick up new material.
//!
//! # Example
//!
//! ```no_run
//! use cert_harvest::{run_ingest, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     bucket: Some("certificates".to_string()),
//!     max_documents: Some(25),
//!     ..Config::default()
//! };
//!
//! let report = run_ingest(config).await?;
//! println!(
//!     "Found {} documents, uploaded {}",
//!     report.documents_found, report.documents_uploaded
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context. The default retrieval strategy additionally needs a Chromium
//! binary on the host.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
mod extract;
mod fetch;
mod identity;
pub mod initialization;
mod models;
mod pipeline;
mod retrieve;
mod storage;
mod utils;

// Re-export public API
pub use config::{Config, FetchStrategy, LogFormat, LogLevel};
pub use error_handling::{
    ErrorKind, FetchError, InitializationError, PersistError, RetrieveError, RunStats, StoreError,
};
pub use extract::{extract_certificates, Extraction};
pub use fetch::download_document;
pub use identity::{document_identity, IdentitySet};
pub use models::{CertificateRecord, DocumentKind, DocumentLink, ObjectMetadata};
pub use retrieve::{build_retriever, PageRetriever};
pub use run::{run_ingest, run_ingest_with, IngestReport, RunOutcome};
pub use storage::{derive_object_key, ObjectStore};

// Internal run module (contains the main ingestion logic)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{debug, info, warn};
    use tokio_util::sync::CancellationToken;
    use url::Url;

    use crate::app::{log_run_summary, print_error_statistics, spawn_signal_listener};
    use crate::config::{Config, DOWNLOAD_DELAY};
    use crate::error_handling::RunStats;
    use crate::extract::extract_certificates;
    use crate::identity::{document_identity, IdentitySet};
    use crate::initialization::{init_client, init_store};
    use crate::pipeline::{process_document, DocumentOutcome, IngestContext};
    use crate::retrieve::{build_retriever, PageRetriever};

    /// How a run ended.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RunOutcome {
        /// Every discovered document was handled.
        Completed,
        /// The run stopped because `--max-documents` was reached.
        CapReached,
        /// The run stopped early at a document boundary after Ctrl-C.
        Interrupted,
    }

    impl RunOutcome {
        /// Stable lowercase form used in the JSON run summary.
        pub fn as_str(&self) -> &'static str {
            match self {
                RunOutcome::Completed => "completed",
                RunOutcome::CapReached => "cap_reached",
                RunOutcome::Interrupted => "interrupted",
            }
        }
    }

    /// Results of an ingestion run.
    ///
    /// Contains summary statistics and metadata about the completed run.
    #[derive(Debug, Clone)]
    pub struct IngestReport {
        /// How the run ended
        pub outcome: RunOutcome,
        /// Certificate rows extracted from the listing table
        pub certificates_found: usize,
        /// Document links discovered across all rows
        pub documents_found: usize,
        /// Documents skipped because they were ingested by an earlier run
        pub documents_skipped: usize,
        /// Documents downloaded and validated as PDFs
        pub documents_downloaded: usize,
        /// Documents successfully uploaded to the object store
        pub documents_uploaded: usize,
        /// Total errors across all kinds
        pub errors: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Identity file the run persisted its known documents to
        pub identity_file: std::path::PathBuf,
    }

    /// Runs a full ingestion with the provided configuration.
    ///
    /// This is the main entry point for the library. It retrieves the listing
    /// page with the configured strategy, extracts certificate records,
    /// downloads each new PDF, and uploads it to the object store. A Ctrl-C
    /// listener is installed so an interrupted run still persists the
    /// identities of everything it uploaded.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the run (strategy, bucket, pacing, etc.)
    ///
    /// # Returns
    ///
    /// Returns an [`IngestReport`] containing summary statistics, or an error
    /// if the run could not complete.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No destination bucket is configured
    /// - The identity file exists but cannot be read or parsed
    /// - The listing page cannot be retrieved
    /// - The identity file cannot be written at the end of the run
    ///
    /// Per-document failures do not abort the run; they are tallied and
    /// reported in the final statistics instead.
    pub async fn run_ingest(config: Config) -> Result<IngestReport> {
        let client = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;
        let retriever = build_retriever(&config, Arc::clone(&client));
        let cancel = spawn_signal_listener();
        run_ingest_with(config, client, retriever, cancel).await
    }

    /// Runs an ingestion with caller-provided retriever and cancellation.
    ///
    /// [`run_ingest`] wraps this with the configured retrieval strategy and a
    /// Ctrl-C listener. Calling it directly allows embedding the pipeline in
    /// a larger application that manages its own shutdown, and swapping the
    /// listing source out in tests.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the run.
    /// * `client` - HTTP client used for document downloads.
    /// * `retriever` - Strategy that produces the rendered listing HTML.
    /// * `cancel` - Token checked between documents; cancelling it stops the
    ///   run at the next document boundary.
    ///
    /// # Errors
    ///
    /// Same contract as [`run_ingest`].
    pub async fn run_ingest_with(
        config: Config,
        client: Arc<reqwest::Client>,
        retriever: Box<dyn PageRetriever>,
        cancel: CancellationToken,
    ) -> Result<IngestReport> {
        let start_time = Instant::now();

        let bucket = config
            .resolve_bucket()
            .context("No destination bucket: pass --bucket or set CERT_HARVEST_BUCKET")?;
        let listing_url = Url::parse(&config.listing_url)
            .with_context(|| format!("Invalid listing URL: {}", config.listing_url))?;

        // A corrupt identity file aborts here, before any network traffic,
        // so it can be repaired without re-downloading anything.
        let mut identities = IdentitySet::load(&config.identity_file)
            .context("Failed to load the identity file")?;
        if !identities.is_empty() {
            info!(
                "Loaded {} known document identities from {}",
                identities.len(),
                config.identity_file.display()
            );
        }

        let stats = Arc::new(RunStats::new());
        let store = Arc::new(init_store(bucket, config.resolve_s3_endpoint()).await);
        let context = IngestContext::new(Arc::clone(&client), store, Arc::clone(&stats));

        info!(
            "Retrieving listing page {listing_url} via the {} strategy",
            retriever.name()
        );
        let html = retriever
            .fetch_page(&listing_url)
            .await
            .context("Failed to retrieve the listing page")?;

        let extraction = extract_certificates(&html, &listing_url);
        if !extraction.table_found {
            warn!("No certificate table on {listing_url}; the page layout may have changed");
        }
        stats.add_certificates(extraction.records.len());
        let link_total: usize = extraction
            .records
            .iter()
            .map(|record| record.document_links.len())
            .sum();
        info!(
            "Extracted {} certificate records carrying {} document links",
            extraction.records.len(),
            link_total
        );

        let mut outcome = RunOutcome::Completed;
        let mut attempted = 0usize;
        let mut skipped = 0usize;

        'records: for record in &extraction.records {
            for link in &record.document_links {
                if cancel.is_cancelled() {
                    outcome = RunOutcome::Interrupted;
                    break 'records;
                }
                stats.document_found();

                if let Some(cap) = config.max_documents {
                    if attempted >= cap {
                        info!("Reached the cap of {cap} documents; stopping");
                        outcome = RunOutcome::CapReached;
                        break 'records;
                    }
                }

                let identity = document_identity(&link.url);
                if identities.contains(&identity) {
                    debug!("Skipping already-ingested document {}", link.url);
                    skipped += 1;
                    continue;
                }

                match process_document(&context, record, link).await {
                    DocumentOutcome::Uploaded => {
                        identities.insert(identity);
                    }
                    DocumentOutcome::StoreFailed => {}
                    // A failed download spent no bandwidth on the registry,
                    // so it neither counts toward the cap nor earns a delay.
                    DocumentOutcome::FetchFailed => continue,
                }
                attempted += 1;

                // Politeness delay between downloads; an interrupt cuts it
                // short and ends the run at this document boundary.
                tokio::select! {
                    () = tokio::time::sleep(DOWNLOAD_DELAY) => {}
                    () = cancel.cancelled() => {
                        outcome = RunOutcome::Interrupted;
                        break 'records;
                    }
                }
            }
        }

        if outcome == RunOutcome::Interrupted {
            warn!("Run interrupted; persisting identities for the documents already uploaded");
        }

        // Persisting covers interrupted runs too: everything uploaded so far
        // must be remembered or the next run would duplicate it.
        if let Err(e) = identities.save(&config.identity_file) {
            log::error!(
                "Failed to persist document identities to {}: {e}",
                config.identity_file.display()
            );
            return Err(e).context("Failed to persist the identity file");
        }
        info!(
            "Persisted {} document identities to {}",
            identities.len(),
            config.identity_file.display()
        );

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_error_statistics(&stats);

        let report = IngestReport {
            outcome,
            certificates_found: stats.certificates_found(),
            documents_found: stats.documents_found(),
            documents_skipped: skipped,
            documents_downloaded: stats.documents_downloaded(),
            documents_uploaded: stats.documents_uploaded(),
            errors: stats.total_errors(),
            elapsed_seconds,
            identity_file: config.identity_file.clone(),
        };
        log_run_summary(&report);

        Ok(report)
    }

}

//! Per-document processing step.
//!
//! Takes one classified document link through download, validation, key
//! derivation, and upload. Failures are tallied on the run statistics and
//! reported through the outcome so the orchestrator can decide what counts
//! toward the run cap and which documents become known identities.

use chrono::Utc;

use super::IngestContext;
use crate::error_handling::ErrorKind;
use crate::fetch::download_document;
use crate::models::{CertificateRecord, DocumentLink, ObjectMetadata};
use crate::storage::derive_object_key;

/// What happened to a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document was downloaded, validated, and stored.
    Uploaded,
    /// The download failed or the body was not a PDF; nothing was stored.
    FetchFailed,
    /// The document was downloaded but the object store rejected the upload.
    StoreFailed,
}

/// Downloads one document and uploads it to the object store.
///
/// Counts the download and upload on the run statistics and tallies any
/// error under its [`ErrorKind`]. The caller remains responsible for
/// identity bookkeeping; a document becomes a known identity only on
/// [`DocumentOutcome::Uploaded`].
///
/// # Arguments
///
/// * `context` - Shared run resources.
/// * `record` - Certificate row the document belongs to.
/// * `link` - The classified PDF link to process.
///
/// # Returns
///
/// The outcome of the attempt; this function does not fail the run.
pub async fn process_document(
    context: &IngestContext,
    record: &CertificateRecord,
    link: &DocumentLink,
) -> DocumentOutcome {
    let bytes = match download_document(&context.client, &link.url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Skipping document {}: {e}", link.url);
            context.stats.record_error(e.kind());
            return DocumentOutcome::FetchFailed;
        }
    };
    context.stats.document_downloaded();

    let ingested_at = Utc::now();
    let key = derive_object_key(record, link.kind, ingested_at);
    let metadata = ObjectMetadata::new(record, link, ingested_at);
    log::debug!("Uploading {} bytes as {key}", bytes.len());

    match context.store.upload(&key, bytes, &metadata).await {
        Ok(()) => {
            context.stats.document_uploaded();
            log::info!("Stored {} as {key}", link.url);
            DocumentOutcome::Uploaded
        }
        Err(e) => {
            log::error!("Upload of {} failed: {e}", link.url);
            context.stats.record_error(ErrorKind::StoreRejected);
            DocumentOutcome::StoreFailed
        }
    }
}

//! Run statistics tracking.
//!
//! This module provides thread-safe counters for the ingestion pipeline:
//! how many certificates and document links were discovered, how many
//! documents were downloaded and uploaded, and a per-kind error tally.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ErrorKind;

/// Thread-safe statistics for a single ingestion run.
///
/// All counters are monotonically increasing for the lifetime of a run and
/// use atomic operations, so the struct can be shared across tasks behind an
/// `Arc`. Error counts are keyed by [`ErrorKind`] with every kind initialized
/// to zero on creation.
pub struct RunStats {
    certificates_found: AtomicUsize,
    documents_found: AtomicUsize,
    documents_downloaded: AtomicUsize,
    documents_uploaded: AtomicUsize,
    errors: HashMap<ErrorKind, AtomicUsize>,
}

impl RunStats {
    /// Creates a new statistics tracker with all counters at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        RunStats {
            certificates_found: AtomicUsize::new(0),
            documents_found: AtomicUsize::new(0),
            documents_downloaded: AtomicUsize::new(0),
            documents_uploaded: AtomicUsize::new(0),
            errors,
        }
    }

    /// Records the number of certificate rows extracted from the listing.
    pub fn add_certificates(&self, count: usize) {
        self.certificates_found.fetch_add(count, Ordering::Relaxed);
    }

    /// Records one discovered document link.
    pub fn document_found(&self) {
        self.documents_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one successfully downloaded (and validated) document.
    pub fn document_downloaded(&self) {
        self.documents_downloaded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one successfully uploaded document.
    pub fn document_uploaded(&self) {
        self.documents_uploaded.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the error counter for the given kind.
    ///
    /// This should never miss if `RunStats` is constructed via `new()`, which
    /// initializes every kind. A miss is logged rather than panicking.
    pub fn record_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in RunStats initialization.",
                kind
            );
        }
    }

    /// Number of certificate rows extracted from the listing.
    pub fn certificates_found(&self) -> usize {
        self.certificates_found.load(Ordering::SeqCst)
    }

    /// Number of document links discovered.
    pub fn documents_found(&self) -> usize {
        self.documents_found.load(Ordering::SeqCst)
    }

    /// Number of documents downloaded and validated as PDFs.
    pub fn documents_downloaded(&self) -> usize {
        self.documents_downloaded.load(Ordering::SeqCst)
    }

    /// Number of documents uploaded to the object store.
    pub fn documents_uploaded(&self) -> usize {
        self.documents_uploaded.load(Ordering::SeqCst)
    }

    /// Count for a single error kind.
    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or_else(|| {
                log::warn!(
                    "Error kind {:?} not found in stats map, returning 0. \
                     This indicates a bug in RunStats initialization.",
                    kind
                );
                0
            })
    }

    /// Total error count across all kinds.
    pub fn total_errors(&self) -> usize {
        ErrorKind::iter().map(|k| self.error_count(k)).sum()
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

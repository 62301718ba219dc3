//! Shared resources for document processing.
//!
//! This module defines the `IngestContext` struct that groups the resources
//! every document step needs, reducing function argument counts and making
//! the pipeline easier to test.

use std::sync::Arc;

use crate::error_handling::RunStats;
use crate::storage::ObjectStore;

/// Context containing the shared resources needed to process documents.
///
/// One context is built per run and handed to each document step by
/// reference; all members are cheaply cloneable handles.
#[derive(Clone)]
pub struct IngestContext {
    /// HTTP client for downloading documents
    pub client: Arc<reqwest::Client>,
    /// Destination object store
    pub store: Arc<ObjectStore>,
    /// Run statistics tracker
    pub stats: Arc<RunStats>,
}

impl IngestContext {
    /// Creates a new `IngestContext` with the given resources.
    pub fn new(client: Arc<reqwest::Client>, store: Arc<ObjectStore>, stats: Arc<RunStats>) -> Self {
        Self {
            client,
            store,
            stats,
        }
    }
}

//! Document processing pipeline.
//!
//! This module contains the per-document machinery of a run: the shared
//! [`IngestContext`] and the [`process_document`] step that moves a single
//! PDF from the registry into the object store. Run-level orchestration
//! (listing retrieval, identity bookkeeping, pacing, shutdown) lives in the
//! crate's `run` module.

mod context;
mod step;

// Re-export public API
pub use context::IngestContext;
pub use step::{process_document, DocumentOutcome};

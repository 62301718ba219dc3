//! Error handling and run statistics.
//!
//! This module provides:
//! - Error type definitions for every pipeline component
//! - Run statistics tracking with a per-kind error tally
//!
//! Errors fall into two tiers:
//! - **Fatal**: retrieval and persistence failures that abort the run
//! - **Per-document**: fetch and store failures that are counted and skipped

mod stats;
mod types;

// Re-export public API
pub use stats::RunStats;
pub use types::{
    ErrorKind, FetchError, InitializationError, PersistError, RetrieveError, StoreError,
};

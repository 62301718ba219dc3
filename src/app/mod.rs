//! Main application modules.
//!
//! This module provides shutdown handling and statistics printing used by
//! the ingestion run.

pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use shutdown::spawn_signal_listener;
pub use statistics::{log_run_summary, print_error_statistics};

//! Small shared utilities.
//!
//! This module provides object-key sanitization and CSS selector helpers
//! used across the pipeline.

mod sanitize;
mod selector;

// Re-export public API
pub use sanitize::{sanitize_key_component, truncate_chars};
pub use selector::parse_selector_unsafe;

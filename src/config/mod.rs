//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timing, environment variable names)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, FetchStrategy, LogFormat, LogLevel};

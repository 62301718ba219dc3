//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - The logger (stderr or file, plain or JSON)
//! - The HTTP client (browser-like headers and timeouts)
//! - The object store client
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod store;

// Re-export public API
pub use client::init_client;
pub use logger::{init_logger_to_file, init_logger_with};
pub use store::init_store;

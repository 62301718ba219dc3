//! Error type definitions.
//!
//! This module defines all error types used throughout the application.
//! Retrieval errors are fatal (the run cannot proceed without a listing
//! page); fetch and store errors are per-document and only counted.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message (e.g., file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while retrieving the rendered certificate listing page.
///
/// All of these abort the run: without a listing there is nothing to harvest.
#[derive(Error, Debug)]
pub enum RetrieveError {
    /// The certificate table never appeared within the rendering deadline.
    #[error("timed out waiting for the certificate table at {url}")]
    Timeout {
        /// Page that was being rendered
        url: String,
    },

    /// The retrieval backend could not be brought up at all
    /// (e.g. the headless browser failed to launch).
    #[error("retriever unavailable: {0}")]
    RetrieverUnavailable(String),

    /// A proxy strategy was selected but its API key is not configured.
    #[error("{service} API key not configured (set {env_var})")]
    AuthMissing {
        /// Human-readable name of the proxy service
        service: &'static str,
        /// Environment variable that should hold the key
        env_var: &'static str,
    },

    /// The upstream service failed: transport error, non-success status, or
    /// a response body that does not carry page content.
    #[error("{service} request failed: {message}")]
    Upstream {
        /// Human-readable name of the failing service
        service: &'static str,
        /// What went wrong
        message: String,
    },

    /// The search proxy returned no result for the listing page.
    #[error("no indexed content found for {url}")]
    NotFound {
        /// Page that was queried
        url: String,
    },
}

/// Errors raised while downloading a single certificate document.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be completed (connect, timeout, body read).
    #[error("request for {url} failed: {source}")]
    Transport {
        /// Document URL
        url: String,
        /// Underlying client error
        #[source]
        source: ReqwestError,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Document URL
        url: String,
        /// Status code received
        status: reqwest::StatusCode,
    },

    /// The response body does not start with the `%PDF` signature.
    #[error("{url} did not return a PDF document")]
    NotAPdf {
        /// Document URL
        url: String,
    },
}

impl FetchError {
    /// Maps this error onto its statistics bucket.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport { .. } => ErrorKind::DocumentRequest,
            FetchError::Status { .. } => ErrorKind::DocumentStatus,
            FetchError::NotAPdf { .. } => ErrorKind::NotAPdf,
        }
    }
}

/// Error raised when the object store rejects an upload.
#[derive(Error, Debug)]
#[error("object store rejected {key}: {message}")]
pub struct StoreError {
    /// Object key that was being written
    pub key: String,
    /// Full error chain reported by the SDK
    pub message: String,
}

/// Errors raised while loading or saving the persisted identity file.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The identity file exists but could not be read.
    #[error("failed to read identity file {path}: {source}")]
    Read {
        /// Identity file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The identity file exists but does not hold a JSON string array.
    #[error("identity file {path} is not valid JSON: {source}")]
    Malformed {
        /// Identity file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The identity file could not be written or atomically replaced.
    #[error("failed to write identity file {path}: {source}")]
    Write {
        /// Identity file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Per-document error buckets tallied during a run.
///
/// One document attempt can add at most one entry here; retrieval failures
/// are fatal and never reach this tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    /// Document request failed at the transport level
    DocumentRequest,
    /// Document endpoint answered with a non-success status
    DocumentStatus,
    /// Downloaded body was not a PDF
    NotAPdf,
    /// Object store rejected the upload
    StoreRejected,
}

impl ErrorKind {
    /// Human-readable label used in the end-of-run error breakdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DocumentRequest => "Document request error",
            ErrorKind::DocumentStatus => "Document status error",
            ErrorKind::NotAPdf => "Not a PDF",
            ErrorKind::StoreRejected => "Object store rejection",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

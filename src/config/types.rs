//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    BUCKET_VAR, DEFAULT_IDENTITY_FILE, DEFAULT_LISTING_URL, DEFAULT_USER_AGENT, ENDPOINT_VAR,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the certificate listing page is retrieved.
///
/// The listing site renders its table with JavaScript, so a plain GET of the
/// page returns an empty shell. Each strategy solves that differently; all of
/// them return the same thing, the fully rendered page source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetchStrategy {
    /// Drive a local headless Chromium and capture the rendered page
    Browser,
    /// Delegate rendering to the Brightdata request API
    RenderApi,
    /// Pull cached page content from the Tavily search API
    SearchApi,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line
/// flags. Credentials are never taken as flags: proxy API keys and object
/// store credentials come from the environment (a `.env` file is honored).
///
/// # Examples
///
/// ```bash
/// # Harvest with a local headless Chromium into an AWS bucket
/// cert_harvest --bucket certificate-archive
///
/// # Render through the Brightdata proxy, cap the run, use a local MinIO
/// cert_harvest --strategy render-api --bucket certs \
///     --s3-endpoint http://localhost:9000 --max-documents 25
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cert_harvest",
    about = "Harvests certificate PDFs from a registry listing into object storage."
)]
pub struct Config {
    /// Retrieval backend for the listing page: browser|render-api|search-api
    #[arg(long, value_enum, default_value_t = FetchStrategy::Browser)]
    pub strategy: FetchStrategy,

    /// Certificate listing page to harvest
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Destination bucket (falls back to the CERT_HARVEST_BUCKET env var)
    #[arg(long)]
    pub bucket: Option<String>,

    /// S3-compatible endpoint override, e.g. a local MinIO
    /// (falls back to the S3_ENDPOINT env var; AWS is used when unset)
    #[arg(long)]
    pub s3_endpoint: Option<String>,

    /// Stop after this many documents have been attempted
    #[arg(long)]
    pub max_documents: Option<usize>,

    /// Path of the persisted identity file tracking ingested documents
    #[arg(long, value_parser, default_value = DEFAULT_IDENTITY_FILE)]
    pub identity_file: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write log output to this file instead of the console
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: FetchStrategy::Browser,
            listing_url: DEFAULT_LISTING_URL.to_string(),
            bucket: None,
            s3_endpoint: None,
            max_documents: None,
            identity_file: PathBuf::from(DEFAULT_IDENTITY_FILE),
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            log_file: None,
        }
    }
}

impl Config {
    /// Resolves the destination bucket from the CLI flag or the
    /// `CERT_HARVEST_BUCKET` environment variable, in that order.
    ///
    /// An empty value counts as unset, so a blank flag still falls through
    /// to the environment.
    ///
    /// # Returns
    ///
    /// `Some(bucket)` when configured, `None` otherwise.
    pub fn resolve_bucket(&self) -> Option<String> {
        self.bucket
            .clone()
            .filter(|b| !b.is_empty())
            .or_else(|| std::env::var(BUCKET_VAR).ok().filter(|b| !b.is_empty()))
    }

    /// Resolves the S3-compatible endpoint override from the CLI flag or the
    /// `S3_ENDPOINT` environment variable, in that order.
    ///
    /// # Returns
    ///
    /// `Some(endpoint)` when an override is configured, `None` for plain AWS.
    pub fn resolve_s3_endpoint(&self) -> Option<String> {
        self.s3_endpoint
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| std::env::var(ENDPOINT_VAR).ok().filter(|e| !e.is_empty()))
    }
}

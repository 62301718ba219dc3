//! Tests for command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use cert_harvest::config::{DEFAULT_IDENTITY_FILE, DEFAULT_LISTING_URL};
use cert_harvest::{Config, FetchStrategy, LogFormat, LogLevel};

#[test]
fn test_parse_with_no_arguments_uses_defaults() {
    let config = Config::try_parse_from(["cert_harvest"]).expect("Should parse with no args");

    assert_eq!(config.strategy, FetchStrategy::Browser);
    assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
    assert!(config.bucket.is_none());
    assert!(config.s3_endpoint.is_none());
    assert_eq!(config.max_documents, None);
    assert_eq!(config.identity_file, PathBuf::from(DEFAULT_IDENTITY_FILE));
    assert_eq!(config.timeout_seconds, 30);
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
    assert!(config.log_file.is_none());
}

#[test]
fn test_parse_strategy_values() {
    for (flag, expected) in [
        ("browser", FetchStrategy::Browser),
        ("render-api", FetchStrategy::RenderApi),
        ("search-api", FetchStrategy::SearchApi),
    ] {
        let config = Config::try_parse_from(["cert_harvest", "--strategy", flag])
            .unwrap_or_else(|e| panic!("Strategy {flag} should parse: {e}"));
        assert_eq!(config.strategy, expected);
    }
}

#[test]
fn test_parse_rejects_unknown_strategy() {
    let result = Config::try_parse_from(["cert_harvest", "--strategy", "carrier-pigeon"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_storage_flags() {
    let config = Config::try_parse_from([
        "cert_harvest",
        "--bucket",
        "certificates",
        "--s3-endpoint",
        "http://localhost:9000",
    ])
    .expect("Storage flags should parse");

    assert_eq!(config.bucket.as_deref(), Some("certificates"));
    assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));
}

#[test]
fn test_parse_run_limits() {
    let config = Config::try_parse_from([
        "cert_harvest",
        "--max-documents",
        "25",
        "--timeout-seconds",
        "10",
        "--identity-file",
        "/tmp/seen.json",
    ])
    .expect("Run limit flags should parse");

    assert_eq!(config.max_documents, Some(25));
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.identity_file, PathBuf::from("/tmp/seen.json"));
}

#[test]
fn test_parse_rejects_non_numeric_cap() {
    let result = Config::try_parse_from(["cert_harvest", "--max-documents", "many"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_logging_flags() {
    let config = Config::try_parse_from([
        "cert_harvest",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "harvest.log",
    ])
    .expect("Logging flags should parse");

    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.log_file, Some(PathBuf::from("harvest.log")));
}

#[test]
fn test_parse_listing_url_override() {
    let config = Config::try_parse_from([
        "cert_harvest",
        "--listing-url",
        "https://registry.example/certs",
    ])
    .expect("Listing URL flag should parse");

    assert_eq!(config.listing_url, "https://registry.example/certs");
}

#[test]
fn test_parse_rejects_unknown_flag() {
    let result = Config::try_parse_from(["cert_harvest", "--frobnicate"]);
    assert!(result.is_err());
}

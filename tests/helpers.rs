// Shared test helpers for ingestion tests.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;

use async_trait::async_trait;
use cert_harvest::{Config, LogLevel, PageRetriever, RetrieveError};
use url::Url;

/// A minimal PDF body that passes magic-number validation.
#[allow(dead_code)] // Used by other test files
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n";

/// Retriever that returns a canned listing page instead of hitting the network.
pub struct StubRetriever {
    html: String,
}

impl StubRetriever {
    #[allow(dead_code)] // Used by other test files
    pub fn new(html: String) -> Self {
        Self { html }
    }
}

#[async_trait]
impl PageRetriever for StubRetriever {
    async fn fetch_page(&self, _url: &Url) -> Result<String, RetrieveError> {
        Ok(self.html.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Retriever that always fails, for exercising the abort path.
pub struct FailingRetriever;

#[async_trait]
impl PageRetriever for FailingRetriever {
    async fn fetch_page(&self, url: &Url) -> Result<String, RetrieveError> {
        Err(RetrieveError::Timeout {
            url: url.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing-stub"
    }
}

/// Builds one certificate table row with the given document links.
#[allow(dead_code)] // Used by other test files
pub fn listing_row(number: &str, company: &str, links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, label)| format!(r#"<a href="{href}">{label}</a> "#))
        .collect();
    format!(
        "<tr><td>{number}</td><td>{company}</td><td>Germany</td>\
         <td>2025-01-01 - 2026-01-01</td><td>Control Union</td><td>{anchors}</td></tr>"
    )
}

/// Wraps rows in the registry listing's page structure, including a header
/// row and a truncated row that extraction must drop.
#[allow(dead_code)] // Used by other test files
pub fn listing_page(rows: &[String]) -> String {
    format!(
        "<html><body><table>\
         <tr><th>Certificate</th><th>Company</th><th>Country</th>\
         <th>Valid</th><th>Body</th><th>Docs</th></tr>\
         {}\
         <tr><td>EU-ISCC-Cert-FR200-99999</td><td>Broken Row SARL</td><td>France</td></tr>\
         </table></body></html>",
        rows.concat()
    )
}

/// Builds a run configuration pointed at test servers.
///
/// The strategy field is irrelevant because tests inject their own retriever
/// through `run_ingest_with`.
#[allow(dead_code)] // Used by other test files
pub fn test_config(identity_file: &Path, s3_endpoint: &str) -> Config {
    Config {
        bucket: Some("test-bucket".to_string()),
        s3_endpoint: Some(s3_endpoint.to_string()),
        identity_file: identity_file.to_path_buf(),
        log_level: LogLevel::Error, // Reduce noise in tests
        timeout_seconds: 5,
        user_agent: "cert_harvest_test/1.0".to_string(),
        ..Config::default()
    }
}

/// Points the AWS credential chain at static test credentials.
///
/// All tests set identical values, so concurrent calls are harmless, and
/// disabling IMDS keeps the SDK from probing for instance metadata.
#[allow(dead_code)] // Used by other test files
pub fn set_test_aws_env() {
    std::env::set_var("AWS_ACCESS_KEY_ID", "test-access-key");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "test-secret-key");
    std::env::set_var("AWS_EC2_METADATA_DISABLED", "true");
}

/// Reads the identity file back as the list it stores.
#[allow(dead_code)] // Used by other test files
pub fn read_identities(path: &Path) -> Vec<String> {
    let data = std::fs::read_to_string(path).expect("identity file should exist");
    serde_json::from_str(&data).expect("identity file should be valid JSON")
}

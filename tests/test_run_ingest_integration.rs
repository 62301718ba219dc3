//! Integration tests for the run_ingest orchestration.
//!
//! These tests drive `run_ingest_with` end to end with a stub listing
//! retriever and mock HTTP servers standing in for the registry's document
//! host and the S3 endpoint. They verify the core run semantics:
//!
//! - New documents are downloaded, validated, and uploaded with derived keys
//! - Previously ingested documents are skipped on later runs
//! - The document cap and Ctrl-C both stop the run at a document boundary
//! - The identity file reflects exactly what was uploaded

#[path = "helpers.rs"]
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use url::Url;

use cert_harvest::{document_identity, run_ingest_with, RunOutcome};
use helpers::{
    listing_page, listing_row, read_identities, set_test_aws_env, test_config, FailingRetriever,
    StubRetriever, PDF_BYTES,
};

fn s3_endpoint(server: &Server) -> String {
    format!("http://{}", server.addr())
}

#[tokio::test]
async fn test_run_ingest_uploads_new_documents() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    let doc_server = Server::run();
    doc_server.expect(
        Expectation::matching(request::method_path("GET", "/docs/12345_audit.pdf"))
            .times(1)
            .respond_with(status_code(200).body(PDF_BYTES)),
    );
    let pdf_url = doc_server.url_str("/docs/12345_audit.pdf");

    let s3_server = Server::run();
    s3_server.expect(
        Expectation::matching(all_of![
            request::method(eq("PUT")),
            request::path(matches(
                r"^/test-bucket/certificates/\d{8}/EU-ISCC-Cert-DE100-12345_Acme_Biofuels_GmbH_audit_report\.pdf$"
            )),
            request::headers(contains(("x-amz-meta-pdf_type", "audit_report"))),
            request::body(PDF_BYTES),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );

    let html = listing_page(&[listing_row(
        "EU-ISCC-Cert-DE100-12345",
        "Acme Biofuels GmbH",
        &[(pdf_url.as_str(), "Audit Certificate Summary")],
    )]);

    let config = test_config(&identity_file, &s3_endpoint(&s3_server));
    let client = Arc::new(reqwest::Client::new());
    let report = run_ingest_with(
        config,
        client,
        Box::new(StubRetriever::new(html)),
        CancellationToken::new(),
    )
    .await
    .expect("Run should succeed");

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.certificates_found, 1, "Broken row should be dropped");
    assert_eq!(report.documents_found, 1);
    assert_eq!(report.documents_downloaded, 1);
    assert_eq!(report.documents_uploaded, 1);
    assert_eq!(report.documents_skipped, 0);
    assert_eq!(report.errors, 0);
    assert_eq!(report.identity_file, identity_file);

    let expected_identity = document_identity(&Url::parse(&pdf_url).unwrap());
    assert_eq!(read_identities(&identity_file), vec![expected_identity]);
}

#[tokio::test]
async fn test_run_ingest_skips_already_ingested_documents() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    // One download and one upload across BOTH runs; a second request to
    // either server would fail the .times(1) bound on verify.
    let doc_server = Server::run();
    doc_server.expect(
        Expectation::matching(request::method_path("GET", "/docs/12345_audit.pdf"))
            .times(1)
            .respond_with(status_code(200).body(PDF_BYTES)),
    );
    let pdf_url = doc_server.url_str("/docs/12345_audit.pdf");

    let s3_server = Server::run();
    s3_server.expect(
        Expectation::matching(request::method(eq("PUT")))
            .times(1)
            .respond_with(status_code(200)),
    );

    let html = listing_page(&[listing_row(
        "EU-ISCC-Cert-DE100-12345",
        "Acme Biofuels GmbH",
        &[(pdf_url.as_str(), "Audit Certificate Summary")],
    )]);

    let first = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html.clone())),
        CancellationToken::new(),
    )
    .await
    .expect("First run should succeed");
    assert_eq!(first.documents_uploaded, 1);

    let second = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html)),
        CancellationToken::new(),
    )
    .await
    .expect("Second run should succeed");

    assert_eq!(second.outcome, RunOutcome::Completed);
    assert_eq!(second.documents_found, 1);
    assert_eq!(second.documents_skipped, 1);
    assert_eq!(second.documents_downloaded, 0);
    assert_eq!(second.documents_uploaded, 0);
    assert_eq!(
        read_identities(&identity_file).len(),
        1,
        "Identity set should be unchanged after the second run"
    );
}

#[tokio::test]
async fn test_run_ingest_honors_document_cap() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    // Only the first document may be fetched; no expectation exists for the
    // second, so touching it would fail the run's mock servers.
    let doc_server = Server::run();
    doc_server.expect(
        Expectation::matching(request::method_path("GET", "/docs/first.pdf"))
            .times(1)
            .respond_with(status_code(200).body(PDF_BYTES)),
    );
    let first_url = doc_server.url_str("/docs/first.pdf");
    let second_url = doc_server.url_str("/docs/second.pdf");

    let s3_server = Server::run();
    s3_server.expect(
        Expectation::matching(request::method(eq("PUT")))
            .times(1)
            .respond_with(status_code(200)),
    );

    let html = listing_page(&[listing_row(
        "EU-ISCC-Cert-DE100-12345",
        "Acme Biofuels GmbH",
        &[
            (first_url.as_str(), "Certificate"),
            (second_url.as_str(), "Audit Certificate Summary"),
        ],
    )]);

    let mut config = test_config(&identity_file, &s3_endpoint(&s3_server));
    config.max_documents = Some(1);

    let report = run_ingest_with(
        config,
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html)),
        CancellationToken::new(),
    )
    .await
    .expect("Run should succeed");

    assert_eq!(report.outcome, RunOutcome::CapReached);
    assert_eq!(
        report.documents_found, 2,
        "The document that triggered the cap still counts as found"
    );
    assert_eq!(report.documents_uploaded, 1);
    assert_eq!(read_identities(&identity_file).len(), 1);
}

#[tokio::test]
async fn test_run_ingest_with_cancelled_token_stops_before_any_document() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    // No expectations: any request to either server fails the test.
    let doc_server = Server::run();
    let s3_server = Server::run();
    let pdf_url = doc_server.url_str("/docs/12345_audit.pdf");

    let html = listing_page(&[listing_row(
        "EU-ISCC-Cert-DE100-12345",
        "Acme Biofuels GmbH",
        &[(pdf_url.as_str(), "Audit Certificate Summary")],
    )]);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html)),
        cancel,
    )
    .await
    .expect("An interrupted run still reports");

    assert_eq!(report.outcome, RunOutcome::Interrupted);
    assert_eq!(report.documents_found, 0);
    assert_eq!(report.documents_uploaded, 0);
    assert!(
        read_identities(&identity_file).is_empty(),
        "The identity file is still written so the run leaves a consistent state"
    );
}

#[tokio::test]
async fn test_run_ingest_interrupted_mid_run_persists_completed_uploads() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    let doc_server = Server::run();
    doc_server.expect(
        Expectation::matching(request::method_path("GET", "/docs/first.pdf"))
            .times(1)
            .respond_with(status_code(200).body(PDF_BYTES)),
    );
    let first_url = doc_server.url_str("/docs/first.pdf");
    let second_url = doc_server.url_str("/docs/second.pdf");

    let s3_server = Server::run();
    s3_server.expect(
        Expectation::matching(request::method(eq("PUT")))
            .times(1)
            .respond_with(status_code(200)),
    );

    let html = listing_page(&[
        listing_row(
            "EU-ISCC-Cert-DE100-12345",
            "Acme Biofuels GmbH",
            &[(first_url.as_str(), "Audit Certificate Summary")],
        ),
        listing_row(
            "EU-ISCC-Cert-NL300-54321",
            "Polder Fuels BV",
            &[(second_url.as_str(), "Audit Certificate Summary")],
        ),
    ]);

    // The interrupt lands inside the politeness delay that follows the first
    // upload, well before the second document starts.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let report = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html)),
        cancel,
    )
    .await
    .expect("An interrupted run still reports");

    assert_eq!(report.outcome, RunOutcome::Interrupted);
    assert_eq!(report.documents_uploaded, 1);

    let expected_identity = document_identity(&Url::parse(&first_url).unwrap());
    assert_eq!(
        read_identities(&identity_file),
        vec![expected_identity],
        "Exactly the uploaded document should be remembered"
    );
}

#[tokio::test]
async fn test_run_ingest_counts_non_pdf_documents_without_uploading() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    let doc_server = Server::run();
    doc_server.expect(
        Expectation::matching(request::method_path("GET", "/docs/12345_audit.pdf"))
            .times(1)
            .respond_with(status_code(200).body("<html>not a pdf</html>")),
    );
    let pdf_url = doc_server.url_str("/docs/12345_audit.pdf");

    // No PUT expectation: an upload attempt would fail the test.
    let s3_server = Server::run();

    let html = listing_page(&[listing_row(
        "EU-ISCC-Cert-DE100-12345",
        "Acme Biofuels GmbH",
        &[(pdf_url.as_str(), "Audit Certificate Summary")],
    )]);

    let report = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(StubRetriever::new(html)),
        CancellationToken::new(),
    )
    .await
    .expect("Run should succeed despite the bad document");

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.documents_found, 1);
    assert_eq!(report.documents_downloaded, 0);
    assert_eq!(report.documents_uploaded, 0);
    assert_eq!(report.errors, 1);
    assert!(
        read_identities(&identity_file).is_empty(),
        "A rejected document must not become a known identity"
    );
}

#[tokio::test]
async fn test_run_ingest_aborts_when_the_listing_cannot_be_retrieved() {
    set_test_aws_env();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let identity_file = temp_dir.path().join("processed_pdfs.json");

    let s3_server = Server::run();

    let result = run_ingest_with(
        test_config(&identity_file, &s3_endpoint(&s3_server)),
        Arc::new(reqwest::Client::new()),
        Box::new(FailingRetriever),
        CancellationToken::new(),
    )
    .await;

    assert!(result.is_err());
    assert!(
        !identity_file.exists(),
        "An aborted run must leave the identity file untouched"
    );
}

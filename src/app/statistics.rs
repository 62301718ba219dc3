//! Statistics and summary printing.

use log::{info, warn};
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorKind, RunStats};
use crate::run::IngestReport;

/// Prints per-kind error counts to the log.
///
/// Kinds with a zero count are omitted; nothing is printed when the run
/// recorded no errors at all.
pub fn print_error_statistics(stats: &RunStats) {
    let total_errors = stats.total_errors();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for kind in ErrorKind::iter() {
            let count = stats.error_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}

/// Logs the final run summary as pretty-printed JSON.
///
/// The summary is one self-contained blob, so operators can paste it into a
/// ticket or feed it to `jq` straight from the log.
pub fn log_run_summary(report: &IngestReport) {
    let summary = serde_json::json!({
        "outcome": report.outcome.as_str(),
        "certificates_found": report.certificates_found,
        "documents_found": report.documents_found,
        "documents_skipped": report.documents_skipped,
        "documents_downloaded": report.documents_downloaded,
        "documents_uploaded": report.documents_uploaded,
        "errors": report.errors,
        "elapsed_seconds": report.elapsed_seconds,
        "identity_file": report.identity_file.display().to_string(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(rendered) => info!("Run summary:\n{rendered}"),
        Err(e) => warn!("Failed to render run summary: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::RunOutcome;

    #[test]
    fn test_print_error_statistics_no_errors() {
        let stats = RunStats::new();
        // Should not panic when there are no errors
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_with_errors() {
        let stats = RunStats::new();
        stats.record_error(ErrorKind::DocumentRequest);
        stats.record_error(ErrorKind::DocumentRequest);
        stats.record_error(ErrorKind::NotAPdf);
        // Should not panic when there are errors
        print_error_statistics(&stats);
    }

    #[test]
    fn test_log_run_summary_does_not_panic() {
        let report = IngestReport {
            outcome: RunOutcome::Completed,
            certificates_found: 12,
            documents_found: 15,
            documents_skipped: 3,
            documents_downloaded: 11,
            documents_uploaded: 11,
            errors: 1,
            elapsed_seconds: 42.5,
            identity_file: std::path::PathBuf::from("processed_pdfs.json"),
        };
        log_run_summary(&report);
    }
}

//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_harvest` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cert_harvest::initialization::{init_logger_to_file, init_logger_with};
use cert_harvest::{run_ingest, Config, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting API keys and AWS credentials in .env without exporting them manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    match &config.log_file {
        Some(path) => init_logger_to_file(log_level.into(), log_format, path)
            .context("Failed to initialize logger")?,
        None => {
            init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?
        }
    }

    // Run the ingestion using the library
    match run_ingest(config).await {
        Ok(report) => {
            // Print user-friendly summary
            println!(
                "✅ Found {} document{} ({} uploaded, {} skipped, {} error{}) in {:.1}s",
                report.documents_found,
                if report.documents_found == 1 { "" } else { "s" },
                report.documents_uploaded,
                report.documents_skipped,
                report.errors,
                if report.errors == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            if report.outcome == RunOutcome::Interrupted {
                println!("⚠️ Run was interrupted; rerun to pick up the remaining documents");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("cert_harvest error: {:#}", e);
            process::exit(1);
        }
    }
}

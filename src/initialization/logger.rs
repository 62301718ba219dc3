//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;
use std::path::Path;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Builds an `env_logger` builder with the crate's filtering and formatting.
///
/// The builder reads `RUST_LOG` first, then applies the explicit level on
/// top, so `RUST_LOG=debug` works for quick debugging while `--log-level`
/// still has the final say. Noisy dependencies are pinned to quieter levels.
fn configured_builder(level: LevelFilter, format: LogFormat) -> env_logger::Builder {
    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    // Override with CLI-provided level (takes precedence over RUST_LOG)
    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("chromiumoxide", LevelFilter::Info);
    builder.filter_module("tungstenite", LevelFilter::Warn);
    // The AWS SDK logs connector setup at debug level on every request
    builder.filter_module("aws_config", LevelFilter::Warn);
    builder.filter_module("aws_smithy_runtime", LevelFilter::Warn);
    builder.filter_module("cert_harvest", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder
}

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it. This allows developers to
/// use `RUST_LOG=debug` for quick debugging while still supporting explicit
/// CLI control via `--log-level`.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Returns
///
/// `Ok(())` if initialization succeeds, or an error if logger setup fails.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger initialization fails.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug cert_harvest
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug cert_harvest --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=cert_harvest=debug,reqwest=info cert_harvest
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = configured_builder(level, format);

    // Use try_init() instead of init() to avoid panicking if logger is already initialized
    // This is important for tests where logger may be initialized multiple times
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Initializes the logger writing to a file instead of stderr.
///
/// Colors are disabled so the file does not fill with ANSI escape codes; the
/// emoji level markers are kept because they survive plain-text viewing.
///
/// # Arguments
///
/// * `level` - Minimum log level to record (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
/// * `path` - File to create; an existing file is truncated
///
/// # Returns
///
/// `Ok(())` if initialization succeeds, or an error if logger setup fails.
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the file cannot be
/// created and `InitializationError::LoggerError` if the logger was already
/// initialized.
pub fn init_logger_to_file(
    level: LevelFilter,
    format: LogFormat,
    path: &Path,
) -> Result<(), InitializationError> {
    colored::control::set_override(false);

    let file = std::fs::File::create(path).map_err(|e| {
        InitializationError::LoggerSetupError(format!(
            "cannot open log file {}: {e}",
            path.display()
        ))
    })?;

    let mut builder = configured_builder(level, format);
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

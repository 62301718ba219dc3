//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Spawns a background listener for Ctrl-C and returns its cancellation token.
///
/// The orchestrator checks the token between documents, so an interrupted run
/// always stops at a document boundary and can persist the identities it has
/// uploaded so far.
///
/// # Returns
///
/// A token that becomes cancelled when the process receives an interrupt.
pub fn spawn_signal_listener() -> CancellationToken {
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::warn!("Interrupt received; finishing the current document before stopping");
                signal_token.cancel();
            }
            Err(e) => {
                log::error!("Failed to listen for the interrupt signal: {e}");
            }
        }
    });
    token
}

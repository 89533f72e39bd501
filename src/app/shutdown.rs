//! Graceful shutdown handling.

use log::warn;
use tokio_util::sync::CancellationToken;

/// Stops the schedule ticker and waits for it to finish.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    ticker: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(ticker) = ticker {
        if let Err(e) = ticker.await {
            warn!("Schedule ticker ended abnormally: {}", e);
        }
    }
}

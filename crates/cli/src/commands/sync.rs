//! Promote queued orders to the document store.
//!
//! # Usage
//!
//! ```bash
//! otomono-cli sync
//! ```
//!
//! Walks the local queue one record at a time. Records that reach the
//! document store are removed from the queue; records that fail stay
//! queued for the next run.

use super::{CliError, order_service_from_env};

/// Run a one-shot queue sync.
pub async fn run() -> Result<(), CliError> {
    let service = order_service_from_env()?;

    let queued = service.queue().len().await?;
    if queued == 0 {
        tracing::info!("local queue is empty, nothing to sync");
        return Ok(());
    }

    tracing::info!(queued, "syncing local queue to the document store");
    let report = service.sync_pending().await?;
    tracing::info!(
        synced = report.synced,
        failed = report.failed,
        "queue sync finished"
    );

    if report.failed > 0 {
        tracing::warn!(
            failed = report.failed,
            "some orders stayed queued, re-run once the backend recovers"
        );
    }
    Ok(())
}

//! Push-update worker task

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::services::{Notifier, PushUpdate};

/// Drains the update channel into the push client.
///
/// Runs apart from the timer operations, so a slow widget endpoint delays
/// nothing but its own updates; when the worker lags, intermediate payloads
/// are skipped in favor of the latest one.
pub async fn push_update_task(mut notifier: Notifier, mut updates: watch::Receiver<PushUpdate>) {
    while updates.changed().await.is_ok() {
        let update = updates.borrow_and_update().clone();
        if let Err(e) = notifier.push(&update).await {
            warn!("Error while sending widget update: {:#}", e);
        }
    }
    debug!("Push update channel closed, worker exiting");
}

//! Periodic passive-refresh background task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{error, info};

use crate::state::AppState;

/// Drives the timer forward at a fixed short period, so an interval that
/// expires while nobody is polling still completes, fires its hook and
/// updates the widget.
pub async fn refresh_ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting refresh ticker ({}ms period)", period.as_millis());

    let mut interval = interval(period);
    loop {
        interval.tick().await;
        if let Err(e) = state.refresh().await {
            error!("Failed to refresh timer state: {}", e);
        }
    }
}

//! Main application state management

use std::sync::Mutex;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::services::{Hooks, IconKind, PushUpdate};
use crate::state::status::{Separators, Status};
use crate::state::timer::{CycleConfig, Timer, TimerEvent};

/// Shared application state: the timer behind its lock, plus the handles
/// for everything a transition owes the outside world.
#[derive(Debug)]
pub struct AppState {
    timer: Mutex<Timer>,
    separators: Separators,
    hooks: Hooks,
    /// Feed for the push worker; `None` when no destination is configured.
    push_tx: Option<watch::Sender<PushUpdate>>,
}

impl AppState {
    /// Create a new AppState holding a stopped work timer
    pub fn new(
        config: CycleConfig,
        separators: Separators,
        hooks: Hooks,
        push_tx: Option<watch::Sender<PushUpdate>>,
    ) -> Self {
        Self {
            timer: Mutex::new(Timer::new(config)),
            separators,
            hooks,
            push_tx,
        }
    }

    /// Start-or-pause the current interval. Returns the fresh status.
    pub async fn toggle(&self) -> Result<Status, String> {
        let now = Instant::now();
        let (status, event) = {
            let mut timer = self
                .timer
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            let event = timer.toggle(now);
            (Status::capture(&timer, now, &self.separators), event)
        };
        self.dispatch(event, &status).await;
        Ok(status)
    }

    /// Stop the interval, or switch mode when already stopped.
    pub async fn stop_or_switch(&self) -> Result<Status, String> {
        let now = Instant::now();
        let status = {
            let mut timer = self
                .timer
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            timer.stop_or_switch();
            Status::capture(&timer, now, &self.separators)
        };
        self.dispatch(None, &status).await;
        Ok(status)
    }

    /// Passive refresh: applies a pending expiry, then projects.
    ///
    /// Called by the background ticker and by every read endpoint, so an
    /// interval that ran out while nobody was polling still completes.
    pub async fn refresh(&self) -> Result<Status, String> {
        let now = Instant::now();
        let (status, event) = {
            let mut timer = self
                .timer
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            let event = timer.tick(now);
            (Status::capture(&timer, now, &self.separators), event)
        };
        self.dispatch(event, &status).await;
        Ok(status)
    }

    /// Side effects owed after a transition, performed with the lock
    /// already released: hooks may take arbitrarily long, and a slow push
    /// destination must never be able to stall a state change.
    async fn dispatch(&self, event: Option<TimerEvent>, status: &Status) {
        self.send_push_update(status);
        match event {
            Some(TimerEvent::Started) => self.hooks.timer_started().await,
            Some(TimerEvent::Expired) => {
                info!("{}", status.line());
                self.hooks.timer_expired().await;
            }
            None => {}
        }
    }

    fn send_push_update(&self, status: &Status) {
        if let Some(tx) = &self.push_tx {
            let update = PushUpdate {
                text: status.timer.clone(),
                icon: IconKind::for_mode(status.mode),
            };
            if tx.send(update).is_err() {
                warn!("Failed to send push update: worker is gone");
            }
        }
    }
}

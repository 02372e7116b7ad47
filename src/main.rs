//! Tomatod - a Pomodoro timer served over local HTTP
//!
//! This is the main entry point for the tomatod daemon.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use tomatod::{
    config::Config,
    state::{format_countdown, AppState},
    api::create_router,
    services::{Hooks, IconKind, IconSet, Notifier, PushUpdate},
    tasks::{push_update_task, refresh_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomatod={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomatod v{}", env!("CARGO_PKG_VERSION"));

    let cycle = config.cycle()?;
    let tick = config.tick_period()?;
    let separators = config.separators();

    info!(
        "Configuration: listen={}, work={:?}, short={:?}, long={:?}, n={}, tick={}ms",
        config.listen, cycle.work, cycle.short_break, cycle.long_break, cycle.intervals, config.tick
    );
    if let Some(command) = &config.command {
        info!("Command to run at the end of intervals: {:?}", command);
    }
    if let Some(command) = &config.start_command {
        info!("Command to run when the timer starts: {:?}", command);
    }

    let hooks = Hooks::new(
        config.start_command.clone(),
        config.command.clone(),
        config.async_hooks,
    );

    // Set up the push pipeline when a destination is configured
    let push_tx = match config.push_url()? {
        Some(url) => {
            let icons = IconSet::load(config.icon_work.as_deref(), config.icon_break.as_deref())?;
            let mut notifier = Notifier::new(url.clone(), config.uuid.clone(), icons)?;
            info!("Sending widget updates every {}ms to {}", config.tick, url);

            // One synchronous update up front, so a dead or misconfigured
            // destination is caught before the server starts.
            let initial = PushUpdate {
                text: format_countdown(cycle.work, &separators.work),
                icon: IconKind::Work,
            };
            if let Err(e) = notifier.push(&initial).await {
                tracing::error!("Error while sending initial update to {}: {:#}", url, e);
                std::process::exit(1);
            }

            let (tx, rx) = watch::channel(initial);
            tokio::spawn(push_update_task(notifier, rx));
            Some(tx)
        }
        None => {
            if config.uuid.is_some() {
                warn!("--uuid is set but no push destination is configured, ignoring it");
            }
            None
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(cycle, separators, hooks, push_tx));

    // Start the passive-refresh background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        refresh_ticker_task(ticker_state, tick).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Unable to listen on {}", config.listen))?;

    info!("Server running on http://{}", config.listen);
    info!("Endpoints:");
    info!("  GET  /             - Name and version");
    info!("  GET  /status       - Countdown text (JSON with Accept: application/json)");
    info!("  GET  /time         - Countdown text");
    info!("  POST /action/start - Start or pause the current interval");
    info!("  POST /action/stop  - Stop the interval, or switch mode");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

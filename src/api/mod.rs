//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.
//! Bodies are countdown text by default, with a JSON record on request, as
//! the widget side expects.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .route("/time", get(time_handler))
        .route("/action/start", post(action_start_handler))
        .route("/action/stop", post(action_stop_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error, info};

use super::responses::StatusResponse;
use crate::state::{AppState, Status};

/// Handle GET / - name and version banner
pub async fn index_handler() -> &'static str {
    concat!("tomatod v", env!("CARGO_PKG_VERSION"), "\n")
}

/// Handle GET /status - countdown text, or the structured record for JSON callers
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let status = refresh(&state).await?;
    debug!("Status endpoint called: {}", status.line());

    if wants_json(&headers) {
        Ok(Json(StatusResponse::from(status)).into_response())
    } else {
        Ok(status.timer.into_response())
    }
}

/// Handle GET /time - countdown text only
pub async fn time_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    let status = refresh(&state).await?;
    debug!("Time endpoint called: {}", status.line());
    Ok(status.timer)
}

/// Handle POST /action/start - start or pause the current interval
pub async fn action_start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<String, StatusCode> {
    match state.toggle().await {
        Ok(status) => {
            info!("Start action: {}", status.line());
            Ok(status.timer)
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /action/stop - stop the interval, or switch mode when stopped
pub async fn action_stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<String, StatusCode> {
    match state.stop_or_switch().await {
        Ok(status) => {
            info!("Stop action: {}", status.line());
            Ok(status.timer)
        }
        Err(e) => {
            error!("Failed to stop or switch timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn refresh(state: &AppState) -> Result<Status, StatusCode> {
    state.refresh().await.map_err(|e| {
        error!("Failed to refresh timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Widget scripts set `Accept: application/json` verbatim, so this is an
/// exact match rather than full content negotiation.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        == Some("application/json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_accept(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, value.parse().unwrap());
        headers
    }

    #[test]
    fn json_negotiation_is_an_exact_match() {
        assert!(wants_json(&headers_with_accept("application/json")));
        assert!(!wants_json(&headers_with_accept("application/json, text/plain")));
        assert!(!wants_json(&headers_with_accept("*/*")));
        assert!(!wants_json(&HeaderMap::new()));
    }
}

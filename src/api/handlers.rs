//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    error::SurfaceError,
    state::AppState,
    timer::Intent,
};
use super::responses::{HealthResponse, IntentResponse, StatusResponse, TimerView};

/// Handle POST /timers/:id/start
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u8>,
) -> Result<Json<IntentResponse>, StatusCode> {
    dispatch(&state, id, Intent::Start).await
}

/// Handle POST /timers/:id/stop
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u8>,
) -> Result<Json<IntentResponse>, StatusCode> {
    dispatch(&state, id, Intent::Stop).await
}

/// Handle POST /timers/:id/reset
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u8>,
) -> Result<Json<IntentResponse>, StatusCode> {
    dispatch(&state, id, Intent::Reset).await
}

async fn dispatch(state: &AppState, id: u8, intent: Intent) -> Result<Json<IntentResponse>, StatusCode> {
    match state.request(id, intent).await {
        Ok((panel, outcome, timer_state)) => {
            info!("Timer {} {} endpoint called - {:?}, showing {}", id, intent, outcome, panel.label());
            Ok(Json(IntentResponse::new(
                outcome,
                intent,
                TimerView::new(panel, timer_state),
            )))
        }
        Err(e) => {
            warn!("Failed to {} timer {}: {}", intent, id, e);
            Err(status_for(&e))
        }
    }
}

/// Handle GET /timers/:id - Return one timer as rendered
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u8>,
) -> Result<Json<TimerView>, StatusCode> {
    let panel = state.panel(id).map_err(|e| status_for(&e))?;
    Ok(Json(TimerView::current(panel)))
}

/// Handle GET /status - Return both timers and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timers: state.panels.iter().map(TimerView::current).collect(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

fn status_for(error: &SurfaceError) -> StatusCode {
    match error {
        SurfaceError::UnknownTimer(_) => StatusCode::NOT_FOUND,
        SurfaceError::TimerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

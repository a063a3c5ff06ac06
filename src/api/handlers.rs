//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::{
    error::{AppError, EngineError},
    input::parse_set_count,
    state::AppState,
};
use super::responses::{CommandResponse, ErrorResponse, HealthResponse, SetsRequest, StatusResponse};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn reject(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(message)))
}

fn app_error(e: AppError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        AppError::Lock(_) => {
            error!("Timer engine unavailable: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::Engine(EngineError::Running) | AppError::Engine(EngineError::BelowCurrentSet { .. }) => {
            StatusCode::CONFLICT
        }
    };
    reject(status, e.to_string())
}

/// Handle POST /start - Toggle between running and paused
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    let display = state.start().map_err(app_error)?;
    let message = if display.finished {
        "All sets complete, reset to start again"
    } else if display.running {
        "Timer running"
    } else {
        "Timer paused"
    };
    info!("Start endpoint called - {}", message);
    Ok(Json(CommandResponse::for_display(message.to_string(), display)))
}

/// Handle POST /reset - Return to the first focus interval
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    let display = state.reset().map_err(app_error)?;
    info!("Reset endpoint called");
    Ok(Json(CommandResponse::stopped("Timer reset".to_string(), display)))
}

/// Handle POST /stop-sound - Silence the completion cue
pub async fn stop_sound_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    let (stopped, display) = state.stop_sound().map_err(app_error)?;
    let message = if stopped { "Sound stopped" } else { "No sound playing" };
    info!("Stop-sound endpoint called - {}", message);
    Ok(Json(CommandResponse::for_display(message.to_string(), display)))
}

/// Handle POST /sets - Validate and apply a new set count
pub async fn sets_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetsRequest>,
) -> ApiResult<CommandResponse> {
    let total_sets = parse_set_count(&request.sets).map_err(|e| {
        warn!("Invalid set count {}: {}", request.sets, e);
        reject(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let display = state.set_total_sets(total_sets).map_err(app_error)?;
    info!("Sets endpoint called - {} sets", total_sets);
    Ok(Json(CommandResponse::for_display(
        format!("Set count is now {}", total_sets),
        display,
    )))
}

/// Handle GET /status - Return the display model and raw timer state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let (timer, display) = state.get_snapshot().map_err(app_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display,
        timer,
        last_transition: StatusResponse::transition_json(state.get_last_transition()),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream the display model on every change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let display_rx = state.subscribe();

    // Emit the current frame first, then one per change
    let frames = stream::unfold((display_rx, true), |(mut display_rx, first)| async move {
        if !first && display_rx.changed().await.is_err() {
            return None;
        }
        let display = display_rx.borrow_and_update().clone();
        let event = Event::default()
            .event("display")
            .json_data(&display)
            .unwrap_or_else(|e| Event::default().comment(format!("failed to encode frame: {}", e)));
        Some((Ok(event), (display_rx, false)))
    });

    Sse::new(frames).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    settings::Settings,
    state::{AppState, CommandError, Phase, TimerSnapshot, UserCommand},
    utils::{format_remaining, now_ms},
};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, IdleReport, ResetRequest, StatusResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(code: StatusCode, message: String) -> ApiError {
    (code, Json(ErrorResponse::new(message)))
}

fn internal_error(message: String) -> ApiError {
    error!("{}", message);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn run_command(state: &AppState, command: UserCommand, message: &str) -> Result<Json<ApiResponse>, ApiError> {
    match state.user_command(command) {
        Ok(timer) => Ok(Json(ApiResponse::ok(message.to_string(), timer))),
        Err(CommandError::Rejected(e)) => Err(api_error(StatusCode::CONFLICT, e.to_string())),
        Err(CommandError::Internal(e)) => Err(internal_error(e)),
    }
}

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_command(&state, UserCommand::Start, "Timer started")
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_command(&state, UserCommand::Pause, "Timer paused")
}

/// Handle POST /timer/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_command(&state, UserCommand::Resume, "Timer resumed")
}

/// Parse the optional reset body; only an empty body means a plain reset
fn parse_reset_request(body: &[u8]) -> Result<ResetRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResetRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid reset body: {}", e)))
}

/// Handle POST /timer/reset - body `{"startBreak": true}` is optional
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let start_break = parse_reset_request(&body)?.start_break;
    let message = if start_break { "Timer reset, break started" } else { "Timer reset" };
    run_command(&state, UserCommand::Reset { start_break }, message)
}

/// Handle POST /power/suspend - hook for system sleep
pub async fn suspend_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    state.system_suspend(now_ms()).map_err(internal_error)?;
    info!("Suspend reported");
    Ok(Json(ApiResponse::ok("Suspend recorded".to_string(), state.snapshot())))
}

/// Handle POST /power/resume - hook for system wake-up
pub async fn wake_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    state.system_resume(now_ms()).map_err(internal_error)?;
    info!("Wake-up reported");
    Ok(Json(ApiResponse::ok("Resume recorded".to_string(), state.snapshot())))
}

/// Handle POST /idle - externally supplied idle sample
pub async fn idle_handler(
    State(state): State<Arc<AppState>>,
    Json(report): Json<IdleReport>,
) -> Result<Json<ApiResponse>, ApiError> {
    state
        .sample_idle(report.idle_seconds, now_ms())
        .map_err(internal_error)?;
    Ok(Json(ApiResponse::ok("Idle sample applied".to_string(), state.snapshot())))
}

/// Handle GET /settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings())
}

/// Handle PUT /settings - persist, then hard-reset the timer
pub async fn save_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    match state.save_settings(settings).await {
        Ok(saved) => Ok(Json(saved)),
        Err(e @ AppError::InvalidSettings(_)) => {
            warn!("Rejected settings: {}", e);
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => Err(internal_error(e.to_string())),
    }
}

fn display(timer: &TimerSnapshot) -> String {
    match (timer.phase, timer.remaining_break_time) {
        (Phase::Break, Some(remaining)) => format_remaining(remaining),
        _ => format_remaining(timer.remaining_time),
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let timer = state.snapshot_at(now_ms()).map_err(internal_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: display(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - stream timer events as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let event_rx = state.subscribe();

    let events = stream::unfold(event_rx, |mut event_rx| async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    let sse = Event::default()
                        .event(event.name())
                        .json_data(&event)
                        .unwrap_or_else(|e| Event::default().comment(format!("dropped event: {}", e)));
                    return Some((Ok::<_, Infallible>(sse), event_rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream client lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

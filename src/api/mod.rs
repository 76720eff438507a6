//! HTTP API module
//!
//! The user command channel (timer commands, power hooks, idle reports,
//! settings) and the read side for presentation (status and event stream).

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
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/resume", post(resume_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/power/suspend", post(suspend_handler))
        .route("/power/resume", post(wake_handler))
        .route("/idle", post(idle_handler))
        .route("/settings", get(get_settings_handler).put(save_settings_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::settings::{Settings, SettingsStore};

    fn create_test_app() -> (Router, Arc<AppState>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("settings.json"));
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Settings::default(),
            store,
        ));
        (create_router(Arc::clone(&state)), state, temp_dir)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_start_pause_resume_flow() {
        let (app, _state, _temp) = create_test_app();

        let (status, body) = send(&app, Method::POST, "/timer/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "running");

        let (status, body) = send(&app, Method::POST, "/timer/pause", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "paused");
        assert_eq!(body["timer"]["pauseKind"], "manual");

        // Activity does not lift a manual pause
        let (_, body) = send(&app, Method::POST, "/idle", Some(serde_json::json!({"idleSeconds": 0}))).await;
        assert_eq!(body["timer"]["phase"], "paused");

        let (status, body) = send(&app, Method::POST, "/timer/resume", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "running");
    }

    #[tokio::test]
    async fn test_invalid_command_conflicts() {
        let (app, _state, _temp) = create_test_app();

        let (status, body) = send(&app, Method::POST, "/timer/resume", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_reset_with_and_without_body() {
        let (app, _state, _temp) = create_test_app();

        let (status, body) = send(&app, Method::POST, "/timer/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "idle");

        let (_, body) = send(
            &app,
            Method::POST,
            "/timer/reset",
            Some(serde_json::json!({"startBreak": true})),
        )
        .await;
        assert_eq!(body["timer"]["phase"], "break");
        assert_eq!(body["timer"]["remainingTime"], 300_000);
    }

    #[tokio::test]
    async fn test_malformed_reset_body_is_rejected() {
        let (app, state, _temp) = create_test_app();
        state.user_command(crate::state::UserCommand::Start).unwrap();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/timer/reset")
            .body(Body::from("{\"startBreak\": tru"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.snapshot().phase, crate::state::Phase::Running);

        // A valid body without a content type is still honored
        let request = Request::builder()
            .method(Method::POST)
            .uri("/timer/reset")
            .body(Body::from(r#"{"startBreak": true}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.snapshot().phase, crate::state::Phase::Break);
    }

    #[tokio::test]
    async fn test_settings_roundtrip_and_validation() {
        let (app, state, _temp) = create_test_app();
        state.sample_idle(0, crate::utils::now_ms()).unwrap();

        let (status, body) = send(&app, Method::GET, "/settings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workDuration"], 300_000);

        let new_settings = serde_json::json!({
            "workDuration": 2_700_000,
            "inactivityThreshold": 60_000,
            "resetThreshold": 600_000,
            "checkInterval": 1000
        });
        let (status, body) = send(&app, Method::PUT, "/settings", Some(new_settings)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workDuration"], 2_700_000);
        assert_eq!(state.settings().work_duration, 2_700_000);
        assert_eq!(state.snapshot().phase, crate::state::Phase::Idle);

        let invalid = serde_json::json!({"workDuration": 0});
        let (status, _) = send(&app, Method::PUT, "/settings", Some(invalid)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.settings().work_duration, 2_700_000);
    }

    #[tokio::test]
    async fn test_power_hooks() {
        let (app, _state, _temp) = create_test_app();
        send(&app, Method::POST, "/timer/start", None).await;

        let (_, body) = send(&app, Method::POST, "/power/suspend", None).await;
        assert_eq!(body["timer"]["phase"], "paused");
        assert_eq!(body["timer"]["pauseKind"], "automatic");

        let (_, body) = send(&app, Method::POST, "/power/resume", None).await;
        assert_eq!(body["timer"]["phase"], "running");
    }

    #[tokio::test]
    async fn test_status_and_health() {
        let (app, _state, _temp) = create_test_app();

        let (status, body) = send(&app, Method::GET, "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "idle");
        assert_eq!(body["display"], "5:00");
        assert_eq!(body["port"], 20554);

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}

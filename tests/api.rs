use std::{num::NonZeroU32, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_timer::{
    api::create_router,
    audio::SilentCue,
    state::AppState,
    tasks::engine_events,
};

fn app(total_sets: u32) -> (Router, Arc<AppState>) {
    let (events_tx, _events_rx) = engine_events();
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        NonZeroU32::new(total_sets).unwrap(),
        Box::new(SilentCue::default()),
        events_tx,
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn status_reports_initial_display() {
    let (app, _state) = app(4);

    let (status, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"]["time_text"], "25:00");
    assert_eq!(body["display"]["phase_label"], "Focus Time");
    assert_eq!(body["display"]["sets_text"], "Set: 1 / 4");
    assert_eq!(body["display"]["progress_fraction"], 1.0);
    assert_eq!(body["timer"]["phase"], "work");
    assert_eq!(body["timer"]["seconds_remaining"], 1500);
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["last_transition"], Value::Null);
}

#[tokio::test]
async fn start_toggles_running() {
    let (app, state) = app(4);

    let (status, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["display"]["start_button_label"], "Pause");
    assert_eq!(body["display"]["sets_input_enabled"], false);

    let (_, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["message"], "Timer paused");
    assert!(!state.get_timer_state().unwrap().running);
}

#[tokio::test]
async fn sets_rejected_while_running() {
    let (app, state) = app(4);
    send(&app, "POST", "/start", None).await;

    let (status, body) = send(&app, "POST", "/sets", Some(json!({ "sets": 2 }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(state.get_timer_state().unwrap().total_sets.get(), 4);
}

#[tokio::test]
async fn sets_updates_when_stopped() {
    let (app, state) = app(4);

    let (status, body) = send(&app, "POST", "/sets", Some(json!({ "sets": "6" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"]["sets_text"], "Set: 1 / 6");
    assert_eq!(state.get_timer_state().unwrap().total_sets.get(), 6);
}

#[tokio::test]
async fn invalid_set_counts_never_reach_engine() {
    let (app, state) = app(4);

    for bad in [json!(0), json!(-2), json!(1.5), json!("many"), json!(null), json!(500)] {
        let (status, body) = send(&app, "POST", "/sets", Some(json!({ "sets": bad }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "accepted {}", bad);
        assert_eq!(body["status"], "error");
    }

    assert_eq!(state.get_timer_state().unwrap().total_sets.get(), 4);
}

#[tokio::test]
async fn reset_returns_to_initial_state() {
    let (app, state) = app(3);
    send(&app, "POST", "/start", None).await;

    let (status, body) = send(&app, "POST", "/reset", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["display"]["time_text"], "25:00");
    let timer = state.get_timer_state().unwrap();
    assert!(!timer.running);
    assert!(!timer.sound_active);
    assert_eq!(timer.current_set, 1);
    assert_eq!(timer.seconds_remaining, 1500);
}

#[tokio::test]
async fn stop_sound_while_silent_is_harmless() {
    let (app, state) = app(4);
    let before = state.get_timer_state().unwrap();

    let (status, body) = send(&app, "POST", "/stop-sound", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No sound playing");
    assert_eq!(body["display"]["stop_sound_visible"], false);
    assert_eq!(state.get_timer_state().unwrap(), before);
}

#[tokio::test]
async fn last_action_is_recorded() {
    let (app, _state) = app(4);
    send(&app, "POST", "/start", None).await;

    let (_, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(body["last_action"], "start");
    assert!(body["last_action_time"].is_string());
}

#[tokio::test]
async fn health_check() {
    let (app, _state) = app(1);

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn events_stream_current_frame_then_changes() {
    let (app, state) = app(4);
    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8_lossy(&first);
    assert!(first.contains("event: display"), "{}", first);
    assert!(first.contains("\"running\":false"), "{}", first);

    state.start().unwrap();

    let second = frames.next().await.unwrap().unwrap();
    let second = String::from_utf8_lossy(&second);
    assert!(second.contains("event: display"), "{}", second);
    assert!(second.contains("\"running\":true"), "{}", second);
}

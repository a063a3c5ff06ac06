//! Pomodoro Timer - A work/break countdown served over HTTP
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    audio::{AudioCue, CommandPlayer, SilentCue},
    config::Config,
    state::AppState,
    tasks::{engine_event_task, engine_events},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, sets={}, mute={}",
          config.host, config.port, config.sets, config.mute);

    // Ticks and playback notifications share one channel into the engine
    let (events_tx, events_rx) = engine_events();

    let audio: Box<dyn AudioCue + Send> = if config.mute {
        Box::new(SilentCue::default())
    } else {
        info!("Completion cue: {} via {}", config.sound.display(), config.player);
        Box::new(CommandPlayer::new(config.player.clone(), config.sound.clone(), events_tx.clone()))
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.sets,
        audio,
        events_tx,
    ));

    // Start the engine event background task
    let event_state = Arc::clone(&state);
    tokio::spawn(async move {
        engine_event_task(event_state, events_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start or pause the countdown");
    info!("  POST /reset      - Reset to the first focus interval");
    info!("  POST /stop-sound - Silence the completion sound");
    info!("  POST /sets       - Change the number of sets (while stopped)");
    info!("  GET  /status     - Current display and timer state");
    info!("  GET  /events     - Display updates as server-sent events");
    info!("  GET  /health     - Health check");

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

    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop timer engine: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}

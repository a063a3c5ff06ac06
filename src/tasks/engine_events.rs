//! Background events and the task that applies them to the engine

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Events produced off the request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One second elapsed on the schedule identified by `generation`
    Tick { generation: u64 },
    /// Cue playback `playback` finished on its own
    SoundEnded { playback: u64 },
}

pub type EventSender = mpsc::UnboundedSender<EngineEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

/// Create the channel shared by the ticker, the audio player and the event task
pub fn engine_events() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Background task that applies ticks and audio notifications one at a time
pub async fn engine_event_task(state: Arc<AppState>, mut events: EventReceiver) {
    info!("Starting engine event task");

    while let Some(event) = events.recv().await {
        debug!("Engine event: {:?}", event);

        let result = match event {
            EngineEvent::Tick { generation } => state.apply_tick(generation).map(|_| ()),
            EngineEvent::SoundEnded { playback } => state.sound_ended(playback).map(|_| ()),
        };

        if let Err(e) = result {
            error!("Failed to apply engine event: {}", e);
        }
    }

    info!("Engine event channel closed");
}

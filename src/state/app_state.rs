//! Shared application state wrapping the timer engine

use std::{
    num::NonZeroU32,
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    audio::AudioCue,
    engine::{DisplayModel, TickOutcome, TimerEngine, TimerState, Transition},
    error::AppError,
    tasks::{EventSender, Ticker},
};

/// Engine type used by the running service
pub type PomodoroEngine = TimerEngine<Box<dyn AudioCue + Send>, Ticker>;

/// Main application state: the engine plus the metadata served alongside it
pub struct AppState {
    /// The single engine instance; the lock serialises every mutation
    engine: Mutex<PomodoroEngine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    pub last_transition: Mutex<Option<Transition>>,
    /// Display model broadcast after every change
    pub display_tx: watch::Sender<DisplayModel>,
}

impl AppState {
    /// Create the engine with its tick source wired to `events`
    pub fn new(
        port: u16,
        host: String,
        total_sets: NonZeroU32,
        audio: Box<dyn AudioCue + Send>,
        events: EventSender,
    ) -> Self {
        let engine = TimerEngine::new(total_sets, audio, Ticker::new(events));
        let (display_tx, _) = watch::channel(engine.display());

        Self {
            engine: Mutex::new(engine),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            last_transition: Mutex::new(None),
            display_tx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, PomodoroEngine>, AppError> {
        self.engine
            .lock()
            .map_err(|e| AppError::Lock(e.to_string()))
    }

    /// Run `f` against the engine, then publish the resulting display model
    fn update<T, F>(&self, action: Option<&str>, f: F) -> Result<(T, DisplayModel), AppError>
    where
        F: FnOnce(&mut PomodoroEngine) -> Result<T, AppError>,
    {
        let mut engine = self.lock_engine()?;
        let value = f(&mut *engine)?;
        let display = engine.display();
        drop(engine); // Release the lock early

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        // send_if_modified skips the wake-up when a tick changed nothing visible
        self.display_tx.send_if_modified(|current| {
            if *current == display {
                false
            } else {
                *current = display.clone();
                true
            }
        });

        Ok((value, display))
    }

    /// Toggle running/paused
    pub fn start(&self) -> Result<DisplayModel, AppError> {
        let (running, display) = self.update(Some("start"), |engine| Ok(engine.start()))?;
        info!("Start command: running={}", running);
        Ok(display)
    }

    /// Reset to the first focus interval
    pub fn reset(&self) -> Result<DisplayModel, AppError> {
        let (_, display) = self.update(Some("reset"), |engine| {
            engine.reset();
            Ok(())
        })?;
        if let Ok(mut last) = self.last_transition.lock() {
            *last = None;
        }
        Ok(display)
    }

    /// Change the number of sets; rejected while running
    pub fn set_total_sets(&self, total_sets: NonZeroU32) -> Result<DisplayModel, AppError> {
        let (_, display) = self.update(Some("sets"), |engine| {
            engine.set_total_sets(total_sets).map_err(|e| {
                warn!("Rejected set count {}: {}", total_sets, e);
                AppError::from(e)
            })
        })?;
        Ok(display)
    }

    /// Silence the completion cue; the flag is false when nothing was playing
    pub fn stop_sound(&self) -> Result<(bool, DisplayModel), AppError> {
        self.update(Some("stop-sound"), |engine| Ok(engine.stop_sound()))
    }

    /// Apply a tick delivered by the ticker
    pub fn apply_tick(&self, generation: u64) -> Result<TickOutcome, AppError> {
        let (outcome, _) = self.update(None, |engine| Ok(engine.handle_tick(generation)))?;

        if let TickOutcome::Completed(transition) = outcome {
            if let Ok(mut last) = self.last_transition.lock() {
                *last = Some(transition);
            }
        }

        Ok(outcome)
    }

    /// Cue playback `playback` ended without user action
    pub fn sound_ended(&self, playback: u64) -> Result<DisplayModel, AppError> {
        let (_, display) = self.update(None, |engine| {
            engine.handle_sound_ended(playback);
            Ok(())
        })?;
        Ok(display)
    }

    /// Stop ticking and silence audio ahead of process exit
    pub fn shutdown(&self) -> Result<(), AppError> {
        self.update(None, |engine| {
            engine.teardown();
            Ok(())
        })?;
        Ok(())
    }

    /// Get a snapshot of the raw timer state
    pub fn get_timer_state(&self) -> Result<TimerState, AppError> {
        Ok(self.lock_engine()?.state().clone())
    }

    /// Get the raw state and its display model from a single lock
    pub fn get_snapshot(&self) -> Result<(TimerState, DisplayModel), AppError> {
        let engine = self.lock_engine()?;
        Ok((engine.state().clone(), engine.display()))
    }

    /// Get the current display model
    pub fn get_display(&self) -> Result<DisplayModel, AppError> {
        Ok(self.lock_engine()?.display())
    }

    /// Subscribe to display model updates
    pub fn subscribe(&self) -> watch::Receiver<DisplayModel> {
        self.display_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Get the most recent phase completion since the last reset
    pub fn get_last_transition(&self) -> Option<Transition> {
        self.last_transition.lock().ok().and_then(|t| *t)
    }
}

//! Pomodoro Timer - A work/break countdown engine served over HTTP
//!
//! This library provides the Pomodoro phase state machine, its one-second
//! tick source, completion-cue playback, and the HTTP API that drives it.

pub mod api;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{DisplayModel, Phase, TimerEngine, TimerState};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Error types shared across the engine, the audio backend and the HTTP layer

use std::{io, path::PathBuf};
use thiserror::Error;

/// Commands the engine refuses in its current state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("set count cannot change while the timer is running")]
    Running,

    #[error("set count {requested} is below the set in progress ({current})")]
    BelowCurrentSet { requested: u32, current: u32 },
}

/// Rejections raised while validating a user-entered set count
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetCountError {
    #[error("set count must be a number")]
    NotANumber,

    #[error("set count must be a whole number, got {0}")]
    NotWhole(f64),

    #[error("set count must be between 1 and {max}, got {value}")]
    OutOfRange { value: i64, max: u32 },
}

/// Playback failures. These are logged and swallowed by the engine.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output has not been armed")]
    NotArmed,

    #[error("sound file not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to launch player: {0}")]
    Spawn(#[from] io::Error),
}

/// Failures surfaced by `AppState` to the HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to lock timer engine: {0}")]
    Lock(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

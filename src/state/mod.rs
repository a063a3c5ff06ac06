//! State management module
//!
//! This module holds the shared application state that owns the timer engine.

pub mod app_state;

// Re-export main types
pub use app_state::{AppState, PomodoroEngine};

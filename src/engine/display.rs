//! Display values derived from the timer state
//!
//! Every field here is recomputed from a `TimerState` snapshot after each
//! mutation. Renderers read this model and never touch the engine directly.

use serde::{Deserialize, Serialize};

use super::{Phase, TimerState};

/// Radius of the progress ring in the layout's 120x120 view box
pub const RING_RADIUS: f64 = 52.0;

pub const FINISHED_TIME_TEXT: &str = "Done!";
pub const FINISHED_PHASE_LABEL: &str = "Finished";
pub const FINISHED_SETS_TEXT: &str = "All sets complete!";

/// Circumference of the progress ring stroke
pub fn ring_circumference() -> f64 {
    2.0 * std::f64::consts::PI * RING_RADIUS
}

/// Stroke offset for a given remaining fraction; 0 draws a full ring
pub fn ring_offset(progress_fraction: f64) -> f64 {
    ring_circumference() * (1.0 - progress_fraction)
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub phase: Phase,
    pub phase_label: String,
    pub time_text: String,
    pub progress_fraction: f64,
    pub ring_offset: f64,
    pub ring_circumference: f64,
    pub sets_text: String,
    pub total_sets: u32,
    pub running: bool,
    pub finished: bool,
    pub start_button_label: String,
    pub sets_input_enabled: bool,
    pub reset_enabled: bool,
    pub stop_sound_visible: bool,
}

impl DisplayModel {
    pub fn from_state(state: &TimerState) -> Self {
        let finished = state.is_finished();
        let progress_fraction = state.progress_fraction();

        let (phase_label, time_text, sets_text) = if finished {
            (
                FINISHED_PHASE_LABEL.to_string(),
                FINISHED_TIME_TEXT.to_string(),
                FINISHED_SETS_TEXT.to_string(),
            )
        } else {
            (
                state.phase.label().to_string(),
                format_clock(state.seconds_remaining),
                format!("Set: {} / {}", state.current_set, state.total_sets),
            )
        };

        Self {
            phase: state.phase,
            phase_label,
            time_text,
            progress_fraction,
            ring_offset: ring_offset(progress_fraction),
            ring_circumference: ring_circumference(),
            sets_text,
            total_sets: state.total_sets.get(),
            running: state.running,
            finished,
            start_button_label: if state.running { "Pause" } else { "Start" }.to_string(),
            sets_input_enabled: !state.running,
            reset_enabled: true,
            stop_sound_visible: state.sound_active,
        }
    }
}

impl From<&TimerState> for DisplayModel {
    fn from(state: &TimerState) -> Self {
        Self::from_state(state)
    }
}

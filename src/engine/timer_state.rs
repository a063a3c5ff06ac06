//! Timer state structure and its invariants

use std::num::NonZeroU32;
use serde::{Deserialize, Serialize};

use super::Phase;

/// Everything the engine knows about the countdown in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub running: bool,
    /// 1-indexed; `total_sets + 1` once every set is done
    pub current_set: u32,
    pub total_sets: NonZeroU32,
    pub sound_active: bool,
}

impl TimerState {
    /// Create the initial state: paused at the start of the first focus interval
    pub fn new(total_sets: NonZeroU32) -> Self {
        Self {
            phase: Phase::Work,
            seconds_remaining: Phase::Work.duration_secs(),
            running: false,
            current_set: 1,
            total_sets,
            sound_active: false,
        }
    }

    /// Restore the initial countdown, keeping the configured set count
    pub fn rewind(&mut self) {
        *self = Self::new(self.total_sets);
    }

    /// Check whether every set has been completed
    pub fn is_finished(&self) -> bool {
        !self.running && self.current_set > self.total_sets.get()
    }

    /// Full length of the active phase in seconds
    pub fn phase_duration(&self) -> u32 {
        self.phase.duration_secs()
    }

    /// Share of the active phase still left, 1.0 at phase start
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.seconds_remaining) / f64::from(self.phase_duration())
    }

    /// Enter `phase` with its full duration
    pub(crate) fn begin(&mut self, phase: Phase) {
        self.phase = phase;
        self.seconds_remaining = phase.duration_secs();
    }

    /// Check the range invariants on the countdown and set counter
    pub fn is_consistent(&self) -> bool {
        self.seconds_remaining <= self.phase_duration()
            && self.current_set >= 1
            && self.current_set <= self.total_sets.get() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn initial_state_is_paused_focus() {
        let state = TimerState::new(sets(4));
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.seconds_remaining, 1500);
        assert_eq!(state.current_set, 1);
        assert!(!state.running);
        assert!(!state.sound_active);
        assert!(!state.is_finished());
        assert!(state.is_consistent());
    }

    #[test]
    fn finished_requires_stopped_timer_past_last_set() {
        let mut state = TimerState::new(sets(2));
        state.current_set = 3;
        assert!(state.is_finished());

        state.running = true;
        assert!(!state.is_finished());
    }

    #[test]
    fn progress_fraction_spans_full_to_empty() {
        let mut state = TimerState::new(sets(1));
        assert_eq!(state.progress_fraction(), 1.0);

        state.begin(Phase::Break);
        assert_eq!(state.progress_fraction(), 1.0);

        state.seconds_remaining = 0;
        assert_eq!(state.progress_fraction(), 0.0);
    }

    #[test]
    fn rewind_keeps_set_count() {
        let mut state = TimerState::new(sets(3));
        state.begin(Phase::Break);
        state.current_set = 2;
        state.sound_active = true;

        state.rewind();

        assert_eq!(state, TimerState::new(sets(3)));
    }
}

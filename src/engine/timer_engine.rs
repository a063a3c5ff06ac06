//! Pomodoro phase state machine

use std::num::NonZeroU32;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{DisplayModel, Phase, TimerState};
use crate::{audio::AudioCue, error::EngineError, tasks::Clock};

/// Where a completed countdown led
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "to")]
pub enum Transition {
    /// Focus ended, break begins in the same set
    Break { set: u32 },
    /// Break ended, the next set's focus begins
    Work { set: u32 },
    /// The last break ended
    Finished,
}

/// Result of feeding one tick to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, finished, or a tick from a cancelled schedule
    Ignored,
    /// One second counted down
    Counted { seconds_remaining: u32 },
    /// The countdown hit zero and the phase changed
    Completed(Transition),
}

/// Owns the timer state and its clock and audio collaborators
///
/// Every mutation goes through `&mut self`, so callers serialise ticks and
/// commands by construction.
pub struct TimerEngine<A, C> {
    state: TimerState,
    audio: A,
    clock: C,
}

impl<A: AudioCue, C: Clock> TimerEngine<A, C> {
    pub fn new(total_sets: NonZeroU32, audio: A, clock: C) -> Self {
        Self {
            state: TimerState::new(total_sets),
            audio,
            clock,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn display(&self) -> DisplayModel {
        DisplayModel::from_state(&self.state)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Toggle between running and paused; returns the new running flag
    ///
    /// Always arms the audio output. A finished engine stays finished.
    pub fn start(&mut self) -> bool {
        self.audio.arm();

        if self.state.is_finished() {
            debug!("Start ignored, all sets are complete");
            return false;
        }

        if self.state.running {
            self.halt();
            info!(
                "Timer paused at {} in set {}",
                self.state.seconds_remaining, self.state.current_set
            );
        } else {
            self.state.running = true;
            self.clock.schedule();
            info!(
                "Timer running: {} phase, {}s left, set {}/{}",
                self.state.phase.as_str(),
                self.state.seconds_remaining,
                self.state.current_set,
                self.state.total_sets
            );
        }

        self.state.running
    }

    /// Return to a paused first focus interval and silence the cue
    pub fn reset(&mut self) {
        if self.state.running {
            self.clock.cancel();
        }
        self.state.rewind();
        self.silence();
        info!("Timer reset to {} sets", self.state.total_sets);
    }

    /// Change the number of sets while the timer is stopped
    pub fn set_total_sets(&mut self, total_sets: NonZeroU32) -> Result<(), EngineError> {
        if self.state.running {
            return Err(EngineError::Running);
        }

        if self.state.is_finished() {
            self.state.total_sets = total_sets;
            self.state.rewind();
            info!("Set count changed to {} after completion, countdown restored", total_sets);
            return Ok(());
        }

        if total_sets.get() < self.state.current_set {
            return Err(EngineError::BelowCurrentSet {
                requested: total_sets.get(),
                current: self.state.current_set,
            });
        }

        self.state.total_sets = total_sets;
        info!("Set count changed to {}", total_sets);
        Ok(())
    }

    /// Silence the cue; returns false when nothing was playing
    pub fn stop_sound(&mut self) -> bool {
        if !self.state.sound_active {
            return false;
        }
        self.silence();
        info!("Sound stopped");
        true
    }

    /// The cue finished playing on its own
    pub fn sound_ended(&mut self) {
        if self.state.sound_active {
            self.state.sound_active = false;
            debug!("Cue playback finished");
        }
    }

    /// Apply an ended notice for cue playback `playback`
    pub fn handle_sound_ended(&mut self, playback: u64) {
        if !self.audio.accepts_ended(playback) {
            debug!("Dropping ended notice from replaced cue {}", playback);
            return;
        }
        self.sound_ended();
    }

    /// Apply a tick from the clock schedule identified by `generation`
    pub fn handle_tick(&mut self, generation: u64) -> TickOutcome {
        if !self.clock.accepts(generation) {
            debug!("Dropping tick from stale schedule {}", generation);
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Count down one second, completing the phase when it reaches zero
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Ignored;
        }

        if self.state.seconds_remaining > 0 {
            self.state.seconds_remaining -= 1;
        }

        if self.state.seconds_remaining > 0 {
            return TickOutcome::Counted {
                seconds_remaining: self.state.seconds_remaining,
            };
        }

        let transition = self.complete_phase();
        self.ring();
        TickOutcome::Completed(transition)
    }

    /// Stop ticking and silence audio before the engine goes away
    pub fn teardown(&mut self) {
        if self.state.running {
            self.halt();
        }
        self.silence();
        info!("Timer engine torn down");
    }

    fn complete_phase(&mut self) -> Transition {
        let transition = match self.state.phase {
            Phase::Work => {
                self.state.begin(Phase::Break);
                Transition::Break {
                    set: self.state.current_set,
                }
            }
            Phase::Break if self.state.current_set < self.state.total_sets.get() => {
                self.state.current_set += 1;
                self.state.begin(Phase::Work);
                Transition::Work {
                    set: self.state.current_set,
                }
            }
            Phase::Break => {
                self.state.current_set = self.state.total_sets.get() + 1;
                self.halt();
                Transition::Finished
            }
        };

        info!("Phase complete: {:?}", transition);
        transition
    }

    fn halt(&mut self) {
        self.state.running = false;
        self.clock.cancel();
    }

    fn ring(&mut self) {
        self.state.sound_active = true;
        if let Err(e) = self.audio.play() {
            warn!("Completion cue failed to play: {}", e);
        }
    }

    fn silence(&mut self) {
        self.state.sound_active = false;
        self.audio.pause();
        self.audio.rewind();
    }
}

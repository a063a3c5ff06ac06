//! Completion cue playback
//!
//! The engine owns one `AudioCue` for its whole lifetime and drives it with
//! explicit arm/play/pause/rewind calls. Playback errors never reach callers.

pub mod player;

pub use player::CommandPlayer;

use tracing::debug;

use crate::error::AudioError;

/// Audio output the engine can ring at phase transitions
pub trait AudioCue {
    /// Prepare the output so later playback needs no further user action
    fn arm(&mut self);

    /// Start the cue from its current position
    fn play(&mut self) -> Result<(), AudioError>;

    /// Silence the cue
    fn pause(&mut self);

    /// Move the cue back to its beginning
    fn rewind(&mut self);

    /// Check whether an ended notice for `playback` refers to the live cue
    fn accepts_ended(&self, _playback: u64) -> bool {
        true
    }
}

impl<T: AudioCue + ?Sized> AudioCue for Box<T> {
    fn arm(&mut self) {
        (**self).arm()
    }

    fn play(&mut self) -> Result<(), AudioError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn accepts_ended(&self, playback: u64) -> bool {
        (**self).accepts_ended(playback)
    }
}

/// Cue that never makes a sound
#[derive(Debug, Default)]
pub struct SilentCue {
    armed: bool,
}

impl AudioCue for SilentCue {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if !self.armed {
            return Err(AudioError::NotArmed);
        }
        debug!("Silent cue played");
        Ok(())
    }

    fn pause(&mut self) {}

    fn rewind(&mut self) {}
}

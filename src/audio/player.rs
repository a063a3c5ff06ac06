//! Cue playback through an external player command

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{process::Command, sync::oneshot};
use tracing::{debug, info, warn};

use super::AudioCue;
use crate::{
    error::AudioError,
    tasks::{EngineEvent, EventSender},
};

/// Plays the cue file by launching `player <sound_file>`
///
/// Each playback is a child process watched by a small task. A natural exit
/// is reported to the engine as `EngineEvent::SoundEnded`; pausing kills the
/// child without reporting anything. Every launch gets a new playback number
/// so a notice from a replaced child can be told apart from the live one.
#[derive(Debug)]
pub struct CommandPlayer {
    player: String,
    sound_file: PathBuf,
    events: EventSender,
    armed: bool,
    playback_id: u64,
    playback: Option<oneshot::Sender<()>>,
}

impl CommandPlayer {
    pub fn new(player: impl Into<String>, sound_file: impl Into<PathBuf>, events: EventSender) -> Self {
        Self {
            player: player.into(),
            sound_file: sound_file.into(),
            events,
            armed: false,
            playback_id: 0,
            playback: None,
        }
    }

    pub fn sound_file(&self) -> &Path {
        &self.sound_file
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn playback_id(&self) -> u64 {
        self.playback_id
    }
}

impl AudioCue for CommandPlayer {
    fn arm(&mut self) {
        if self.armed {
            return;
        }

        if self.sound_file.exists() {
            self.armed = true;
            info!("Audio armed: {} via {}", self.sound_file.display(), self.player);
        } else {
            warn!("Sound file {} not found, cue will stay silent", self.sound_file.display());
        }
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if !self.armed {
            return Err(AudioError::NotArmed);
        }
        if !self.sound_file.exists() {
            return Err(AudioError::MissingFile(self.sound_file.clone()));
        }

        // A new cue always starts from the top
        self.pause();

        debug!("Launching {} {}", self.player, self.sound_file.display());
        let mut child = Command::new(&self.player)
            .arg(&self.sound_file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        self.playback_id += 1;
        let playback = self.playback_id;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    match status {
                        Ok(status) => debug!("Cue playback {} ended ({})", playback, status),
                        Err(e) => warn!("Failed to wait for cue player: {}", e),
                    }
                    if events.send(EngineEvent::SoundEnded { playback }).is_err() {
                        debug!("Engine event channel closed, dropping sound-ended notice");
                    }
                }
                _ = stop_rx => {
                    if let Err(e) = child.kill().await {
                        debug!("Cue player already gone: {}", e);
                    }
                }
            }
        });

        self.playback = Some(stop_tx);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(stop) = self.playback.take() {
            // The watcher may have exited already
            let _ = stop.send(());
            debug!("Cue playback stopped");
        }
    }

    fn rewind(&mut self) {
        // Every launch reads the file from the beginning
    }

    fn accepts_ended(&self, playback: u64) -> bool {
        self.playback.is_some() && playback == self.playback_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::tasks::engine_events;

    fn manifest() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
    }

    /// Shell script that stands in for a cue lasting about a second
    fn slow_cue(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pomodoro-{}-{}.sh", name, std::process::id()));
        std::fs::write(&path, "exec sleep 1\n").expect("write cue script");
        path
    }

    #[tokio::test]
    async fn refuses_to_play_before_arming() {
        let (tx, _rx) = engine_events();
        let mut player = CommandPlayer::new("true", manifest(), tx);

        assert!(matches!(player.play(), Err(AudioError::NotArmed)));
    }

    #[tokio::test]
    async fn missing_file_keeps_player_unarmed() {
        let (tx, _rx) = engine_events();
        let mut player = CommandPlayer::new("true", "/nonexistent/cue.oga", tx);

        player.arm();

        assert!(!player.is_armed());
        assert!(player.play().is_err());
    }

    #[tokio::test]
    async fn natural_exit_reports_sound_ended() {
        let (tx, mut rx) = engine_events();
        let mut player = CommandPlayer::new("true", manifest(), tx);

        player.arm();
        player.play().expect("player should launch");

        assert!(matches!(
            rx.recv().await,
            Some(EngineEvent::SoundEnded { playback: 1 })
        ));
    }

    #[tokio::test]
    async fn unknown_player_is_a_spawn_error() {
        let (tx, _rx) = engine_events();
        let mut player = CommandPlayer::new("definitely-not-a-player-binary", manifest(), tx);

        player.arm();

        assert!(matches!(player.play(), Err(AudioError::Spawn(_))));
    }

    #[tokio::test]
    async fn pause_kills_cue_without_reporting_end() {
        let (tx, mut rx) = engine_events();
        let mut player = CommandPlayer::new("sh", slow_cue("pause"), tx);

        player.arm();
        player.play().expect("player should launch");
        player.pause();

        let silenced = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        assert!(silenced.is_err(), "paused cue reported {:?}", silenced);

        player.play().expect("player should relaunch");
        let ended = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(ended, Ok(Some(EngineEvent::SoundEnded { playback: 2 }))));

        let _ = std::fs::remove_file(player.sound_file());
    }

    #[tokio::test]
    async fn replaced_cue_notice_is_not_accepted() {
        let (tx, _rx) = engine_events();
        let mut player = CommandPlayer::new("sh", slow_cue("replace"), tx);

        player.arm();
        player.play().expect("first launch");
        assert!(player.accepts_ended(1));

        player.play().expect("second launch");
        assert_eq!(player.playback_id(), 2);
        assert!(!player.accepts_ended(1));
        assert!(player.accepts_ended(2));

        player.pause();
        assert!(!player.accepts_ended(2));

        let _ = std::fs::remove_file(player.sound_file());
    }
}

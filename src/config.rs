//! Configuration and CLI argument handling

use std::{num::NonZeroU32, path::PathBuf};
use clap::Parser;

use crate::input::parse_set_count_str;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A Pomodoro work/break countdown served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20555")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Number of focus sets to run
    #[arg(short, long, default_value = "4", value_parser = parse_set_count_str)]
    pub sets: NonZeroU32,

    /// Sound file played when a phase completes
    #[arg(long, default_value = "/usr/share/sounds/freedesktop/stereo/complete.oga")]
    pub sound: PathBuf,

    /// Command used to play the sound file
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Never play the completion sound
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["pomodoro-timer"]).unwrap();
        assert_eq!(config.sets.get(), 4);
        assert_eq!(config.address(), "0.0.0.0:20555");
        assert_eq!(config.log_level(), "info");
        assert!(!config.mute);
    }

    #[test]
    fn rejects_invalid_set_counts() {
        for bad in ["0", "-1", "abc", "2.5", "100"] {
            assert!(
                Config::try_parse_from(["pomodoro-timer", "--sets", bad]).is_err(),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn verbose_switches_log_level() {
        let config = Config::try_parse_from(["pomodoro-timer", "-v", "-s", "2"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.sets.get(), 2);
    }
}

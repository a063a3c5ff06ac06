//! Interval kinds and their fixed lengths

use serde::{Deserialize, Serialize};

/// Length of a focus interval
pub const WORK_MINUTES: u32 = 25;
/// Length of a break interval
pub const BREAK_MINUTES: u32 = 5;

/// The interval currently counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Full length of this phase in seconds
    pub fn duration_secs(self) -> u32 {
        match self {
            Phase::Work => WORK_MINUTES * 60,
            Phase::Break => BREAK_MINUTES * 60,
        }
    }

    /// Label shown above the ring
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::Break => "Break Time",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{DisplayModel, TimerState, Transition};

/// Response returned by every command endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplayModel,
}

impl CommandResponse {
    /// Create a new command response
    pub fn new(status: String, message: String, display: DisplayModel) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Create a response describing a timer that is counting down
    pub fn running(message: String, display: DisplayModel) -> Self {
        Self::new("running".to_string(), message, display)
    }

    /// Create a response describing a stopped timer
    pub fn stopped(message: String, display: DisplayModel) -> Self {
        Self::new("stopped".to_string(), message, display)
    }

    /// Pick `running` or `stopped` from the display model
    pub fn for_display(message: String, display: DisplayModel) -> Self {
        if display.running {
            Self::running(message, display)
        } else {
            Self::stopped(message, display)
        }
    }
}

/// Error body for rejected commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Body of POST /sets; the value is validated before it reaches the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetsRequest {
    #[serde(default)]
    pub sets: Value,
}

/// Full status: rendered values plus the raw state behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: DisplayModel,
    pub timer: TimerState,
    pub last_transition: Option<Value>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl StatusResponse {
    pub fn transition_json(transition: Option<Transition>) -> Option<Value> {
        transition.and_then(|t| serde_json::to_value(t).ok())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

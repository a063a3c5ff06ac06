//! Background tasks module
//!
//! This module contains the tick source and the task that feeds its ticks,
//! along with audio notifications, into the engine.

pub mod engine_events;
pub mod ticker;

// Re-export main types and functions
pub use engine_events::{engine_event_task, engine_events, EngineEvent, EventReceiver, EventSender};
pub use ticker::{Clock, Ticker, TICK_PERIOD};

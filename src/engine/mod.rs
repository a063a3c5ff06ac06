//! Timer engine module
//!
//! The Pomodoro state machine, the state it owns, and the display values
//! derived from that state.

pub mod display;
pub mod phase;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use display::DisplayModel;
pub use phase::{Phase, BREAK_MINUTES, WORK_MINUTES};
pub use timer_engine::{TickOutcome, TimerEngine, Transition};
pub use timer_state::TimerState;
